//! Single command: one URL, one shortcut file.

use crate::cli::SingleArgs;
use crate::cli::io::write_output;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_config::Config;
use linkfile_render::{SingleFile, single_file};

pub fn render_single(config: &Config, args: &SingleArgs) -> Result<SingleFile> {
    let output = args.output_type.unwrap_or(config.output);
    let privacy = args.privacy.unwrap_or(config.privacy);
    single_file(&args.url, output, privacy, args.name.as_deref()).or_raise(|| ErrorKind::Render)
}

pub fn run_single(config: &Config, args: &SingleArgs) -> Result<()> {
    let file = render_single(config, args)?;
    if args.stdout {
        return write_output(None, file.rendered.contents.as_bytes());
    }
    let path = args.dir.join(&file.filename);
    write_output(Some(&path), file.rendered.contents.as_bytes())?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkfile_render::OutputType;
    use linkfile_url::PrivacyMode;
    use std::path::PathBuf;

    fn args(url: &str, dir: PathBuf) -> SingleArgs {
        SingleArgs { url: url.to_string(), name: None, output_type: None, privacy: None, dir, stdout: false }
    }

    #[test]
    fn test_writes_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { output: OutputType::Url, privacy: PrivacyMode::StripTracking, ..Default::default() };
        run_single(&config, &args("example.com/?utm_source=x&id=2", dir.path().to_path_buf())).unwrap();
        let contents = std::fs::read_to_string(dir.path().join("example.url")).unwrap();
        assert_eq!(contents, "[InternetShortcut]\nURL=https://example.com/?id=2\n");
    }

    #[test]
    fn test_flags_win_over_config() {
        let mut single = args("https://example.com/page", PathBuf::from("."));
        single.output_type = Some(OutputType::Webloc);
        single.name = Some("Saved Page".to_string());
        let file = render_single(&Config::default(), &single).unwrap();
        assert_eq!(file.filename, "Saved_Page.webloc");
        assert!(file.rendered.contents.contains("<string>https://example.com/page</string>"));
    }

    #[test]
    fn test_invalid_url() {
        let err = render_single(&Config::default(), &args("not a url", PathBuf::from("."))).unwrap_err();
        assert_eq!(*err, ErrorKind::Render);
    }
}
