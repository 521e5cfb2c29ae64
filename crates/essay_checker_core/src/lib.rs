pub mod domain;
pub mod ports;

pub use domain::{
    AnalysisOutcome, AnalysisResult, AuthSession, EssayDraft, EssayRecord, User, UserCredentials,
};
pub use ports::{AuthService, EssayAnalysisService, EssayStoreService, PortError, PortResult};
