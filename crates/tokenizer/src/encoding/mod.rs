//! Text <-> token conversion against a learned merge table.
//!
//! Both directions only ask whether a string is one of the merge table's
//! output tokens; the rank of a merge is never consulted.

pub mod reconstructor;
pub mod segmenter;

pub use reconstructor::Reconstructor;
pub use segmenter::Segmenter;
