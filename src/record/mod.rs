mod line;
mod model;
mod tags;

pub use line::{InfoLine, Origin};
pub use model::Record;
pub(crate) use model::replace_file;
pub use tags::{MergePolicy, TagMap};
