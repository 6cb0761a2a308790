pub mod image_flow;
pub mod product_ctx;

pub use image_flow::ImageFlow;
pub use product_ctx::ProductCtx;

#[cfg(test)]
pub(crate) mod fakes;
