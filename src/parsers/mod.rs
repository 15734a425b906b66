pub mod html;
pub mod table;

pub use html::{Document, Element};
pub use table::{FactRow, FactTable};
