pub mod chunking;
pub mod commit;
pub mod commit_list;
pub mod configuration;
pub mod error;
pub mod messages;
pub mod pr_body;
pub mod pull_request;
pub mod template;

pub use commit::{Commit, UserIdentityMap};
pub use configuration::{GitHubSettings, MessageTemplates, NotifyConfig, SlackSettings};
pub use error::AppError;
pub use pr_body::PrBody;
pub use pull_request::{EventAction, PullRequestEvent, PullRequestState, RepoId};
