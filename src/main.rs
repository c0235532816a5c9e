fn main() {
    slack_pr_notify::app::cli::run();
}
