//! Tests for command dispatch and exit codes

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use navmenu::cli::{execute, Cli};
use navmenu::exitcode;
use navmenu::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn run(args: &[&str]) -> Result<(), i32> {
    let cli = Cli::try_parse_from(std::iter::once("navmenu").chain(args.iter().copied()))
        .expect("valid arguments");
    execute(&cli).map_err(|e| e.exit_code())
}

#[rstest]
#[case(&["check", "tests/resources/menus/site.json"])]
#[case(&["tree", "tests/resources/menus/site.toml", "--menu", "footer"])]
#[case(&["render", "tests/resources/menus/site.json", "-m", "main", "-a", "home"])]
#[case(&["render", "tests/resources/menus/site.json", "-f", "bootstrap", "-o", "whiteSpaces=0"])]
#[case(&["render", "tests/resources/menus/site.json", "-o", "menuId=2024", "-o", "subMenuStyle=0"])]
#[case(&["render", "tests/resources/menus/site.json", "-o", "openOnHover=true", "-o", "whiteSpaces=2"])]
#[case(&["export", "tests/resources/menus/site.toml", "-m", "main"])]
#[case(&["config", "template"])]
fn given_valid_command_when_execute_then_succeeds(#[case] args: &[&str]) {
    assert_eq!(run(args), Ok(()));
}

#[rstest]
#[case::invalid_record(&["check", "tests/resources/menus/invalid.json"], exitcode::DATAERR)]
#[case::missing_source(&["check", "tests/resources/menus/nope.json"], exitcode::NOINPUT)]
#[case::unknown_menu(&["render", "tests/resources/menus/site.json", "-m", "side"], exitcode::DATAERR)]
#[case::unknown_active(&["render", "tests/resources/menus/site.json", "-a", "nope"], exitcode::DATAERR)]
#[case::unknown_option(&["render", "tests/resources/menus/site.json", "-o", "navClass=x"], exitcode::USAGE)]
#[case::wrong_option_type(&["render", "tests/resources/menus/site.json", "-o", "whiteSpaces=wide"], exitcode::USAGE)]
fn given_failing_command_when_execute_then_exit_code(#[case] args: &[&str], #[case] code: i32) {
    assert_eq!(run(args), Err(code));
}

#[test]
fn given_no_command_when_execute_then_usage() {
    assert_eq!(run(&[]), Err(exitcode::USAGE));
}

#[test]
fn given_output_file_when_export_then_writes_json() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out/menus.json");
    let target_str = target.to_string_lossy().to_string();

    assert_eq!(
        run(&["export", "tests/resources/menus/site.json", "--output", &target_str]),
        Ok(())
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["main"]["widgets"]["parentKey"], "products");
    assert_eq!(written["footer"]["privacy"]["weight"], 40);
}

#[test]
fn given_local_config_with_url_vars_when_export_then_urls_expanded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".navmenu.toml"),
        "[url_vars]\nbase = \"https://example.org\"\n",
    )
    .unwrap();
    std::fs::copy("tests/resources/menus/site.json", dir.path().join("site.json")).unwrap();
    let source = dir.path().join("site.json").to_string_lossy().to_string();
    let target = dir.path().join("export.json");
    let target_str = target.to_string_lossy().to_string();

    assert_eq!(run(&["export", &source, "-m", "footer", "-o", &target_str]), Ok(()));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["imprint"]["url"], "https://example.org/imprint");
}
