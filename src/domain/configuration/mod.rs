pub mod notify_config;

pub use notify_config::{GitHubSettings, MessageTemplates, NotifyConfig, SlackSettings};
