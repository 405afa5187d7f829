use errchain::{ErrorChain, ErrorCode, ErrorOptions, Result};

fn load_configuration(path: &str) -> Result<()> {
    // Simulate a failure to parse a configuration file
    if path == "bad_config.toml" {
        return Err(ErrorChain::with_options(
            ErrorCode::InvalidArgument,
            "configuration file is malformed",
            ErrorOptions::new().with_operation("config::load"),
        ));
    }
    Ok(())
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    match load_configuration("bad_config.toml") {
        Ok(_) => println!("Success!"),
        Err(err) => {
            // What a caller sees: the resolved facets
            println!("1. [RESOLVED]");
            println!("   Code:      {} ({})", err.resolved_code(), err.resolved_code().value());
            println!("   Message:   {}", err.resolved_message());
            println!("   Operation: {}", err.resolved_operation());
            println!("   HTTP:      {}", err.http_status());

            // The single-line trace
            println!("\n2. [TRACE]");
            println!("   {}", err);
            // Output: "3: config::load: configuration file is malformed"

            // The outermost frame only
            println!("\n3. [SUMMARY]");
            println!("   {}", err.summary());
        }
    }
}
