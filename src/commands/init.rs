use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{PlannerError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().map_err(|e| config_io_error(Path::new("<stdout>"), e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| config_io_error(Path::new("<stdin>"), e))?;
    Ok(input.trim().to_string())
}

fn config_io_error(path: &Path, source: io::Error) -> PlannerError {
    PlannerError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    }
}

fn render(config: &Config) -> Result<String> {
    toml::to_string(config).map_err(PlannerError::ConfigSerialize)
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Planner Configuration");
    println!("=====================\n");

    let token = prompt(
        "Enter a GitHub token with project read access (or leave empty to use GITHUB_TOKEN): ",
    )?;
    let owner = prompt("Enter the project owner (user or organization): ")?;
    if owner.is_empty() {
        return Err(PlannerError::MissingOwner);
    }

    let project = prompt("Enter the project number: ")?;
    let project_number = project
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| PlannerError::InvalidArgument(format!("invalid project number: {project}")))?;

    let config = Config {
        token: (!token.is_empty()).then_some(token),
        owner: Some(owner),
        project_number: Some(project_number),
        ..Config::default()
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| config_io_error(&config_path, e))?;
    }

    let contents = render(&config)?;
    std::fs::write(&config_path, contents).map_err(|e| config_io_error(&config_path, e))?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'planner issues'!");

    Ok(())
}
