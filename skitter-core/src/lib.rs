pub mod extractor;
pub mod navigation;
pub mod options;

pub use extractor::{
    BodyExtractor, EndpointExtractor, ScriptExtractor, extract_body_endpoints,
    extract_relative_endpoints,
};
pub use navigation::{Method, Request, Response};
pub use options::Options;

use colored::Colorize;

const BANNER: &str = r#"
      _    _ _   _
  ___| | _(_) |_| |_ ___ _ __
 / __| |/ / | __| __/ _ \ '__|
 \__ \   <| | |_| ||  __/ |
 |___/_|\_\_|\__|\__\___|_|
"#;

/// Prints the startup banner with the crate version.
pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "    {}\n",
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_white()
    );
}
