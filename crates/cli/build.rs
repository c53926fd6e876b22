use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("wikitable")
        .version(env!("CARGO_PKG_VERSION"))
        .author("wikitable contributors")
        .about("Scrape tables from Wikipedia pages into CSV")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(--"output-folder" <DIR> "Write every table as a CSV file into this folder")
                .value_name("DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--title <TEXT> "Write the single table whose title matches this text")
                .visible_alias("header"),
        )
        .arg(clap::arg!(--list "Print a JSON summary of every table"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file for --title (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"newline-replace" <TEXT> "Text that replaces line breaks (<br>) inside cells").default_value(" "))
        .arg(
            clap::arg!(--"max-filename-len" <NUM> "Maximum length of generated file names, without \".csv\"")
                .default_value("250"),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "wikitable", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "wikitable", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "wikitable", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "wikitable", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
