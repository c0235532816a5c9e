pub mod fake_github;
pub mod fake_slack;

#[allow(unused_imports)]
pub use fake_github::{FakeGitHub, commit};
#[allow(unused_imports)]
pub use fake_slack::FakeSlack;
