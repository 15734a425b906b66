pub mod facts;
pub mod featured_image;
pub mod hemispheres;
pub mod news;


pub use facts::extract_facts;
pub use featured_image::extract_featured_image;
pub use hemispheres::{HemisphereExtractor, HemisphereOptions, extract_all};
pub use news::extract_news;
