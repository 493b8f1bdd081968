pub mod diagnostic;
pub mod options;
pub mod outline;
pub mod references;
pub mod source;

pub use diagnostic::*;
pub use options::*;
pub use outline::*;
pub use references::*;
pub use source::*;
