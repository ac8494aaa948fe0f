pub mod document;
pub mod element;
pub mod event;
pub mod html;
pub mod measure;
pub mod surface;
pub mod text;

pub use document::Document;
pub use element::{InputKind, Node, NodeId, Tag};
pub use event::{Event, Key};
pub use surface::Surface;
