pub mod blur_images;
pub mod export;
