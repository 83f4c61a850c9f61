//! End-to-End CLI Tests for the argot demo binary
//!
//! Each test runs the real binary and checks streams and exit status.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Get a command pointing to the argot binary
fn argot() -> Command {
    cargo_bin_cmd!("argot")
}

// ============================================
// Listing and global flags
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn lists_commands_without_arguments() {
        argot()
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "argot {}",
                env!("CARGO_PKG_VERSION")
            )))
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains(
                "argot <command> [options] [arguments]",
            ))
            .stdout(predicate::str::contains("echo"))
            .stdout(predicate::str::contains("demo:abort"));
    }

    #[test]
    fn listing_groups_namespaced_commands() {
        let output = argot().output().unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();

        let echo = lines.iter().position(|l| l.trim_start().starts_with("echo")).unwrap();
        let heading = lines.iter().position(|l| *l == "demo").unwrap();
        let abort = lines
            .iter()
            .position(|l| l.trim_start().starts_with("demo:abort"))
            .unwrap();
        let chain = lines
            .iter()
            .position(|l| l.trim_start().starts_with("demo:chain"))
            .unwrap();

        assert!(echo < heading);
        assert!(heading < abort);
        assert!(abort < chain);
    }

    #[test]
    fn help_flag_shows_listing() {
        argot()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("inspect"));
    }

    #[test]
    fn help_flag_before_command_shows_command_help() {
        argot()
            .args(["--help", "echo", "hi"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Prints its words"))
            .stdout(predicate::str::contains("-u, --upper"))
            .stdout(predicate::str::contains("hi\n").not());
    }

    #[test]
    fn shows_version() {
        argot()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn rejects_unknown_color_mode() {
        argot().arg("--color=sometimes").assert().failure();
    }

    #[test]
    fn forced_color_renders_ansi() {
        argot()
            .args(["--color=always", "demo:exit"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[32mNothing left to do"));
    }

    #[test]
    fn unknown_command_suggests_close_match() {
        argot()
            .arg("ech")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command `ech` not found"))
            .stderr(predicate::str::contains("Did you mean `echo`?"));
    }

    #[test]
    fn unknown_command_without_match() {
        argot()
            .arg("deploy")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command `deploy` not found"))
            .stderr(predicate::str::contains("Did you mean").not());
    }
}

// ============================================
// Option and argument binding
// ============================================

mod echo_command {
    use super::*;

    #[test]
    fn prints_words() {
        argot()
            .args(["echo", "hello", "world"])
            .assert()
            .success()
            .stdout("hello world\n");
    }

    #[test]
    fn short_aliases_and_inline_values() {
        argot()
            .args(["echo", "hello", "-u", "world", "-r=2"])
            .assert()
            .success()
            .stdout("HELLO WORLD\nHELLO WORLD\n");
    }

    #[test]
    fn long_option_with_value() {
        argot()
            .args(["echo", "a", "b", "c", "--separator=,"])
            .assert()
            .success()
            .stdout("a,b,c\n");
    }

    #[test]
    fn valued_option_without_value_uses_default() {
        argot()
            .args(["echo", "once", "--repeat"])
            .assert()
            .success()
            .stdout("once\n");
    }

    #[test]
    fn invalid_integer_fails_with_usage() {
        argot()
            .args(["echo", "--repeat=abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Invalid value `abc` for `repeat`, expected integer",
            ))
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("echo [options] [words]"));
    }

    #[test]
    fn unknown_option_fails() {
        argot()
            .args(["echo", "--loud"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown option `loud`"));
    }

    #[test]
    fn bundled_short_flags_are_unknown() {
        argot()
            .args(["echo", "-ur"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown option `ur`"));
    }

    #[test]
    fn throw_error_aborts() {
        argot()
            .args(["echo", "hi", "--repeat=0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid repeat"))
            .stdout(predicate::str::contains("hi").not());
    }

    #[test]
    fn help_lists_options_and_usages() {
        argot()
            .args(["echo", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Prints its words"))
            .stdout(predicate::str::contains("-u, --upper"))
            .stdout(predicate::str::contains("-r, --repeat=N"))
            .stdout(predicate::str::contains("[default: 1]"))
            .stdout(predicate::str::contains("echo hello world --upper"))
            .stdout(predicate::str::contains("Arguments:"));
    }

    #[test]
    fn verbose_prints_debug_output() {
        argot()
            .args(["echo", "hi", "--verbose"])
            .assert()
            .success()
            .stdout(predicate::str::contains("repeating 1 time(s)"));
    }
}

mod inspect_command {
    use super::*;

    fn inspect(args: &[&str]) -> serde_json::Value {
        let output = argot().arg("inspect").args(args).output().unwrap();
        assert!(output.status.success(), "inspect {:?} failed", args);
        serde_json::from_slice(&output.stdout).unwrap()
    }

    #[test]
    fn binds_map_list_and_integer() {
        let json = inspect(&[
            "db",
            "name:users",
            "5",
            "--tags=a,b",
            "--tags=c",
            "-l=3",
        ]);

        assert_eq!(json["arguments"]["target"], "db");
        assert_eq!(json["arguments"]["pairs"]["name"], "users");
        assert_eq!(json["arguments"]["pairs"]["0"], "5");
        assert_eq!(json["options"]["tags"], serde_json::json!(["a", "b", "c"]));
        assert_eq!(json["options"]["level"], 3);
        assert_eq!(json["options"]["help"], false);
        assert_eq!(json["options"]["verbose"], false);
    }

    #[test]
    fn numeric_map_key_does_not_hide_bare_entry() {
        let json = inspect(&["db", "0:x", "y"]);
        assert_eq!(
            json["arguments"]["pairs"],
            serde_json::json!({"0": "x", "1": "y"})
        );
    }

    #[test]
    fn unset_options_without_default_are_absent() {
        let json = inspect(&["db"]);
        assert!(json["options"].get("tags").is_none());
        assert!(json["options"].get("level").is_none());
        assert!(json["arguments"].get("pairs").is_none());
    }

    #[test]
    fn last_scalar_occurrence_wins() {
        let json = inspect(&["db", "--level=1", "--level=2"]);
        assert_eq!(json["options"]["level"], 2);
    }

    #[test]
    fn missing_required_argument() {
        argot()
            .arg("inspect")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Missing required argument `target`",
            ))
            .stdout(predicate::str::contains("inspect [options] target [pairs]"));
    }

    #[test]
    fn help_bypasses_required_argument() {
        argot()
            .args(["inspect", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Help:"))
            .stdout(predicate::str::contains("bare entries are numbered"));
    }
}

// ============================================
// Termination signals
// ============================================

mod lifecycle {
    use super::*;

    #[test]
    fn abort_fails_and_skips_shutdown() {
        argot()
            .args(["demo:abort", "--code=3"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Aborting with code 3"))
            .stdout(predicate::str::contains("shutdown").not());
    }

    #[test]
    fn exit_succeeds_and_skips_shutdown() {
        argot()
            .arg("demo:exit")
            .assert()
            .success()
            .stdout(predicate::str::contains("startup"))
            .stdout(predicate::str::contains("Nothing left to do"))
            .stdout(predicate::str::contains("shutdown").not());
    }

    #[test]
    fn nested_command_keeps_outer_arguments() {
        argot()
            .arg("demo:chain")
            .assert()
            .success()
            .stdout("Running echo\nNESTED\nchain outer\n");
    }

    #[test]
    fn nested_command_with_explicit_argument() {
        argot()
            .args(["demo:chain", "custom"])
            .assert()
            .success()
            .stdout(predicate::str::ends_with("chain custom\n"));
    }
}
