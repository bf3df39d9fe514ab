//! Integration tests for texsync

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use std::process::Output;
    use tempfile::TempDir;
    use texsync::config::{schema::PackagesConfig, Config};
    use texsync::package::join_names;

    fn texsync(config: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("texsync");
        cmd.env_remove("TEXSYNC_CONFIG").arg("--config").arg(config);
        cmd
    }

    /// How often `needle` was shown to the user across stdout and stderr
    fn shown(output: &Output, needle: &str) -> usize {
        String::from_utf8_lossy(&output.stdout).matches(needle).count()
            + String::from_utf8_lossy(&output.stderr).matches(needle).count()
    }

    /// Workspace with a config whose installer manages files in `pkgs/`
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new(install_script: Option<&str>) -> Self {
            let dir = TempDir::new().unwrap();
            let pkgs = dir.path().join("pkgs");
            std::fs::create_dir_all(&pkgs).unwrap();
            let pkgs = pkgs.display().to_string();

            let install = install_script
                .map(str::to_string)
                .unwrap_or_else(|| format!(r#"for p; do touch "{pkgs}/$p"; done"#));

            let config = format!(
                r#"
[general]
audit_log = false

[installer]
program = "sh"
install_args = ["-c", '{install}', "sh"]
uninstall_args = ["-c", 'for p; do rm -f "{pkgs}/$p"; done', "sh"]
list_args = ["-c", 'ls "{pkgs}"']

[cache]
dir = '{cache}'
"#,
                cache = dir.path().join("renders").display(),
            );
            std::fs::write(dir.path().join("config.toml"), config).unwrap();

            Self { dir }
        }

        fn config(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn cmd(&self) -> Command {
            texsync(&self.config())
        }

        fn saved_config(&self) -> String {
            std::fs::read_to_string(self.config()).unwrap()
        }

        fn saved_packages(&self) -> PackagesConfig {
            toml::from_str::<Config>(&self.saved_config()).unwrap().packages
        }

        fn add_render(&self, key_char: char) {
            let renders = self.dir.path().join("renders");
            std::fs::create_dir_all(&renders).unwrap();
            let name = format!("{}.svg", key_char.to_string().repeat(64));
            std::fs::write(renders.join(name), "<svg/>").unwrap();
        }
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        texsync(&temp.path().join("config.toml"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("TeX packages"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        texsync(&temp.path().join("config.toml"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("texsync"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        texsync(&temp.path().join("custom.toml"))
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        texsync(&temp.path().join("config.toml"))
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[packages]"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        texsync(&path).args(["config", "init"]).assert().success();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[installer]"));
    }

    #[test]
    fn invalid_package_names_are_rejected() {
        let sandbox = Sandbox::new(None);
        let before = sandbox.saved_config();

        let assert = sandbox
            .cmd()
            .args(["packages", "set", "amsmath;", "rm"])
            .assert()
            .failure();

        assert_eq!(shown(assert.get_output(), "Invalid package list"), 1);
        assert_eq!(sandbox.saved_config(), before);
    }

    #[cfg(unix)]
    #[test]
    fn set_installs_and_commits_queried_state() {
        let sandbox = Sandbox::new(None);

        sandbox
            .cmd()
            .args(["packages", "set", "amsmath", "pgfplots"])
            .assert()
            .success();

        let saved = sandbox.saved_config();
        assert!(saved.contains("enabled = true"));
        assert!(saved.contains(r#""amsmath""#));
        assert!(saved.contains(r#""pgfplots""#));

        sandbox
            .cmd()
            .args(["packages", "set", "pgfplots"])
            .assert()
            .success();

        assert!(!sandbox.saved_config().contains(r#""amsmath""#));
        assert!(!sandbox.dir.path().join("pkgs").join("amsmath").exists());

        sandbox
            .cmd()
            .args(["packages", "show", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("pgfplots\n"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_install_exits_nonzero_and_keeps_ground_truth() {
        let sandbox = Sandbox::new(Some("exit 1"));
        std::fs::write(sandbox.dir.path().join("pkgs").join("xcolor"), "").unwrap();

        let assert = sandbox
            .cmd()
            .args(["packages", "set", "amsmath"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Installed now: xcolor"));

        assert_eq!(
            shown(assert.get_output(), "Failed to install packages: amsmath"),
            1
        );
        // The installer's failure is logged; piped logs carry no colour codes
        let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
        assert!(stderr.contains("exited with"));
        assert!(!stderr.contains('\u{1b}'));

        let packages = sandbox.saved_packages();
        assert_eq!(packages.installed.display(), "xcolor");
        assert_eq!(join_names(&packages.declared), "amsmath");
    }

    #[cfg(unix)]
    #[test]
    fn disable_removes_and_enable_restores_declared() {
        let sandbox = Sandbox::new(None);
        let pkgs = sandbox.dir.path().join("pkgs");

        sandbox
            .cmd()
            .args(["packages", "set", "amsmath", "tikz"])
            .assert()
            .success();

        sandbox.cmd().args(["packages", "disable"]).assert().success();

        let packages = sandbox.saved_packages();
        assert!(!packages.enabled);
        assert!(packages.installed.is_empty());
        assert!(!pkgs.join("amsmath").exists());
        assert_eq!(join_names(&packages.declared), "amsmath tikz");

        sandbox.cmd().args(["packages", "enable"]).assert().success();

        let packages = sandbox.saved_packages();
        assert!(packages.enabled);
        assert_eq!(packages.installed.display(), "amsmath tikz");
        assert!(pkgs.join("tikz").exists());
    }

    #[cfg(unix)]
    #[test]
    fn enable_without_declared_names_keeps_installed() {
        let sandbox = Sandbox::new(None);
        std::fs::write(sandbox.dir.path().join("pkgs").join("xcolor"), "").unwrap();
        sandbox.cmd().args(["packages", "sync"]).assert().success();

        sandbox
            .cmd()
            .args(["packages", "enable"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already up to date"));

        let packages = sandbox.saved_packages();
        assert!(packages.enabled);
        assert_eq!(packages.installed.display(), "xcolor");
    }

    #[test]
    fn missing_installer_leaves_config_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\naudit_log = false\n\n[installer]\nprogram = \"texsync-no-such-installer\"\n",
        )
        .unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        texsync(&path)
            .args(["packages", "sync"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not available"));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn sync_reads_installed_packages() {
        let sandbox = Sandbox::new(None);
        std::fs::write(sandbox.dir.path().join("pkgs").join("tikz"), "").unwrap();

        sandbox.cmd().args(["packages", "sync"]).assert().success();

        assert!(sandbox.saved_config().contains(r#""tikz""#));
    }

    #[test]
    fn cache_list_empty() {
        let sandbox = Sandbox::new(None);
        sandbox
            .cmd()
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Render cache is empty."));
    }

    #[test]
    fn cache_clear_removes_renders() {
        let sandbox = Sandbox::new(None);
        sandbox.add_render('a');
        sandbox.add_render('b');

        sandbox
            .cmd()
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("a".repeat(64)));

        sandbox
            .cmd()
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Render cache cleared (2 entries)"));

        let remaining = std::fs::read_dir(sandbox.dir.path().join("renders"))
            .unwrap()
            .count();
        assert_eq!(remaining, 0);
    }
}
