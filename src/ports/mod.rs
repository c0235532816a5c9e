mod github;
mod slack;

pub use github::GitHubPort;
pub use slack::{PostedMessage, SlackMessage, SlackPort};
