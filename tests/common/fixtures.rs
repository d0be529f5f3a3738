//! Bundle fixtures and decoder stand-ins

use async_trait::async_trait;
use neutron::{AsarTool, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Bytes written into every fixture `app.asar`
pub const ARCHIVE_BYTES: &[u8] = b"\x04\x00\x00\x00fixture asar header";

/// Shape of the `Resources` directory a fixture bundle gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// `Resources/app.asar`
    Packed,
    /// `Resources/app.asar.unpacked/`
    Unpacked,
    /// `Resources` with neither
    Native,
    /// No `Resources` at all
    Bare,
}

/// Build `<root>/<name>` as a bundle of the given kind
///
/// Every bundle gets `Contents/Info.plist`, `Contents/MacOS/` and a hidden
/// `Contents/.DS_Store`.
pub fn make_bundle(root: &Path, name: &str, kind: BundleKind) -> PathBuf {
    let bundle = root.join(name);
    let contents = bundle.join("Contents");
    fs::create_dir_all(contents.join("MacOS")).unwrap();
    fs::write(contents.join("Info.plist"), b"<plist/>").unwrap();
    fs::write(contents.join(".DS_Store"), b"").unwrap();

    let resources = contents.join("Resources");
    match kind {
        BundleKind::Bare => {}
        BundleKind::Native => fs::create_dir_all(&resources).unwrap(),
        BundleKind::Packed => {
            fs::create_dir_all(&resources).unwrap();
            fs::write(resources.join("app.asar"), ARCHIVE_BYTES).unwrap();
        }
        BundleKind::Unpacked => {
            fs::create_dir_all(resources.join("app.asar.unpacked")).unwrap();
        }
    }
    bundle
}

/// `Contents/Resources` of `bundle`
pub fn resources_of(bundle: &Path) -> PathBuf {
    bundle.join("Contents").join("Resources")
}

/// Write an icon file into the bundle's `Resources`
pub fn add_icon(bundle: &Path, file_name: &str) -> PathBuf {
    let icon = resources_of(bundle).join(file_name);
    fs::write(&icon, b"icns").unwrap();
    icon
}

/// Decoder that writes a small fixed source tree
pub struct FixtureTool;

#[async_trait]
impl AsarTool for FixtureTool {
    async fn version(&self) -> Result<String> {
        Ok("3.2.0".to_string())
    }

    async fn extract(&self, _archive: &Path, dest: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dest.join("lib")).await?;
        tokio::fs::write(dest.join("package.json"), br#"{"main":"lib/main.js"}"#).await?;
        tokio::fs::write(dest.join("lib").join("main.js"), b"app.whenReady()").await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

/// Write an executable `asar` stand-in into `dir` and return its path
///
/// `--version` prints a version, `extract <archive> <dest>` copies the
/// archive to `<dest>/package.json`. With `fail_extract` the extract command
/// prints to stderr and exits 1 without writing anything.
#[cfg(unix)]
pub fn write_fake_asar(dir: &Path, fail_extract: bool) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let extract_body = if fail_extract {
        "echo \"corrupt archive header\" >&2\n  exit 1"
    } else {
        "mkdir -p \"$3\" && cp \"$2\" \"$3/package.json\""
    };
    let script = format!(
        "#!/bin/sh\n\
         case \"$1\" in\n\
         --version) echo \"v3.2.0\" ;;\n\
         extract)\n  {extract_body}\n  ;;\n\
         *) echo \"unknown command $1\" >&2; exit 2 ;;\n\
         esac\n"
    );

    let path = dir.join("asar");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
