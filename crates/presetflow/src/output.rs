//! 出力フォーマット

use clap::ValueEnum;
use colored::Colorize;
use presetflow_core::Preset;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// `value` をJSONまたはYAMLで出力（table指定時はJSON）
pub fn print_structured<T: Serialize>(format: OutputFormat, value: &T) -> anyhow::Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?)
        }
    }
    Ok(())
}

fn providers(preset: &Preset) -> String {
    let providers: Vec<_> = preset
        .spec
        .providers()
        .into_iter()
        .map(|kind| kind.name())
        .collect();
    if providers.is_empty() {
        "-".to_string()
    } else {
        providers.join(",")
    }
}

fn scope(entries: &[String]) -> String {
    if entries.is_empty() {
        "*".to_string()
    } else {
        entries.join(",")
    }
}

/// プリセットを1行ずつ表示（クレデンシャルの値は表示しない）
pub fn print_preset_table(presets: &[Preset]) {
    println!(
        "{:<24} {:<28} {:<28} {}",
        "NAME".bold(),
        "PROVIDERS".bold(),
        "EMAILS".bold(),
        "PROJECTS".bold()
    );
    for preset in presets {
        println!(
            "{:<24} {:<28} {:<28} {}",
            preset.name.cyan(),
            providers(preset),
            scope(&preset.spec.required_emails),
            scope(&preset.spec.projects)
        );
    }
}

/// プリセットの詳細表示（クレデンシャルの値は表示しない）
pub fn print_preset_detail(preset: &Preset) {
    println!("{}: {}", "Name".bold(), preset.name.cyan());
    println!("{}: {}", "Resource version".bold(), preset.resource_version);
    println!("{}: {}", "Providers".bold(), providers(preset));
    println!("{}: {}", "Required emails".bold(), scope(&preset.spec.required_emails));
    println!("{}: {}", "Projects".bold(), scope(&preset.spec.projects));
}

#[cfg(test)]
mod tests {
    use super::*;
    use presetflow_core::{FakeCredentials, HetznerCredentials};

    #[test]
    fn test_providers_column() {
        let preset = Preset::new("p").with_spec(|s| {
            s.fake = Some(FakeCredentials::new("t"));
            s.hetzner = Some(HetznerCredentials::default());
        });
        assert_eq!(providers(&preset), "Fake,Hetzner");
        assert_eq!(providers(&Preset::new("empty")), "-");
    }

    #[test]
    fn test_scope_column() {
        assert_eq!(scope(&[]), "*");
        assert_eq!(
            scope(&["example.com".to_string(), "ops@acme.io".to_string()]),
            "example.com,ops@acme.io"
        );
    }
}
