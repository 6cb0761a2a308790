pub mod candidate_scorer;
pub mod card_builder;
pub mod card_writer;
pub mod classifier;
pub mod image_search;
pub mod og_image;
pub mod query_builder;
pub mod source_resolver;
pub mod tokenizer;

pub use candidate_scorer::{looks_specific, pick_best_image, rank_candidates, score_image};
pub use card_builder::build_card;
pub use card_writer::{write_cards_csv, write_cards_json};
pub use classifier::{detect_brand, detect_category, identify, normalize_name};
pub use image_search::{ImageSearch, TavilySearch};
pub use og_image::{extract_og_image, HttpPageScraper, PageScraper};
pub use query_builder::build_queries;
pub use source_resolver::SourcePolicy;
pub use tokenizer::{extract_model_tokens, scoring_tokens};
