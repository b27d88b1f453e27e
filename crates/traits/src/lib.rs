pub mod callback;
pub mod recording;
pub mod writer;

pub use callback::{CallbackFactory, CallbackRegistry, Canvas, Fragment, TextCallback};
pub use recording::{RecordedRun, RecordingWriter, WriterCall};
pub use writer::{DocumentWriter, ImageOptions, PutOptions, RuleOptions, TextRun, WriterError};
