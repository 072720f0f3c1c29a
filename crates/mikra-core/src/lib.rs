pub mod audio;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod report;
pub mod request;
pub mod session;
pub mod settings;
pub mod text;
pub mod verbose;

pub use audio::{AudioAsset, Recorder, load_audio_file};
pub use error::AnalysisError;
pub use prompt::build_prompt;
pub use provider::AnalysisClient;
pub use report::{AnalysisReport, ParsedCompletion, ReportView, parse_completion, project};
pub use request::{AnalysisRequest, Routing, TextMode};
pub use session::{ReadingSession, StudentContext};
pub use settings::Settings;
pub use verbose::set_verbose;
