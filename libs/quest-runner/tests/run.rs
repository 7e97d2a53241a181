use clap::Parser;
use quest_runner::cli::Cli;
use quest_runner::{run, Summary};
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quest-runner-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

fn write(dir: &PathBuf, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent");
    }
    fs::write(path, text).expect("write script");
}

#[test]
fn lowers_directory_and_skips_failures() {
    let root = scratch("mixed");
    let scripts = root.join("scripts");
    let out = root.join("out");

    write(&scripts, "order.quest", "@kind service;\n@business `订单业务`;\nprocess biz {\nString id = gen.next();\n}\n");
    write(&scripts, "nested/user.ql", "@kind prd;\n@business `用户中心`;\nrequirement login {\n\"短信登录\";\n}\n");
    write(&scripts, "broken.quest", "@kind memo;\nprocess p { }\n");
    write(&scripts, "notes.md", "not a script");

    let cli = Cli::parse_from([
        "quest".into(),
        scripts.display().to_string(),
        "--out".into(),
        out.display().to_string(),
        "--source".into(),
    ]);
    let summary = run(&cli).expect("run");
    assert_eq!(summary, Summary { succeeded: 2, failed: 1 });

    let order: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("order.quest.json")).expect("order report")).expect("json");
    assert_eq!(order["kind"], "service");
    assert_eq!(order["biz_module"], "订单业务");
    assert_eq!(order["units"][0]["name"], "biz");
    assert_eq!(order["units"][0]["text"], "String id = gen.next();");
    assert_eq!(order["units"][0]["calls"], 1);

    let user: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("nested/user.ql.json")).expect("user report")).expect("json");
    assert_eq!(user["kind"], "prd");
    assert_eq!(user["module"]["requirements"]["login"][0], "短信登录");

    assert!(!out.join("broken.quest.json").exists());
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_directory_is_fatal() {
    let cli = Cli::parse_from(["quest", "/no/such/quest/dir"]);
    assert!(run(&cli).is_err());
}
