#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use common::TestProject;
use predicates::prelude::*;

const MANIFEST: &str = r#"
preset "shared-fake" {
    fake { token "shared-token" }
}

preset "acme-only" {
    required-emails "acme.io"
    aws {
        access-key-id "AKIA123"
        secret-access-key "s3cr3t"
    }
}

datacenter "os-fra" {
    openstack {
        enforce-floating-ip #true
    }
}
"#;

fn applied_project() -> TestProject {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);
    project.cmd().arg("apply").assert().success();
    project
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("preset").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("bind"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("ssh-user"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("preset").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("presetflow"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("preset").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// validateコマンドがマニフェストの概要を表示することを確認
#[test]
fn test_validate_manifest() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    project
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("presets: 2"))
        .stdout(predicate::str::contains("datacenters: 1"));
}

/// 不正なプリセット名でvalidateが失敗することを確認
#[test]
fn test_validate_rejects_invalid_preset() {
    let project = TestProject::new();
    project.write_manifest(
        r#"
preset "Not_A_Name" {
    fake { token "t" }
}
"#,
    );

    project
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 presets are invalid"));
}

/// マニフェストがない場合にエラーになることを確認
#[test]
fn test_validate_without_manifest() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("プリセットマニフェストが見つかりません"));
}

/// applyしたプリセットがメールアドレスに応じて一覧に出ることを確認
#[test]
fn test_apply_then_list() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    project
        .cmd()
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-fake created"))
        .stdout(predicate::str::contains("2 created"));

    project
        .cmd()
        .args(["list", "--email", "dev@acme.io", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-fake"))
        .stdout(predicate::str::contains("acme-only"));

    project
        .cmd()
        .args(["list", "--email", "dev@example.com", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-fake"))
        .stdout(predicate::str::contains("acme-only").not());
}

/// 同じマニフェストの再applyでは変更がないことを確認
#[test]
fn test_apply_twice_is_unchanged() {
    let project = applied_project();

    project
        .cmd()
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 created, 0 updated, 2 unchanged"));
}

/// --dry-runではストアに書き込まないことを確認
#[test]
fn test_apply_dry_run_writes_nothing() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    project
        .cmd()
        .args(["apply", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry run)"));

    project
        .cmd()
        .args(["list", "--email", "dev@acme.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No presets visible to dev@acme.io"));
}

/// テーブル表示でクレデンシャルの値が出ないことを確認
#[test]
fn test_table_output_hides_credentials() {
    let project = applied_project();

    project
        .cmd()
        .args(["get", "acme-only", "--email", "dev@acme.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS"))
        .stdout(predicate::str::contains("s3cr3t").not());
}

/// 見えないプリセットは存在しない場合と同じエラーになることを確認
#[test]
fn test_get_hidden_preset_is_not_found() {
    let project = applied_project();

    project
        .cmd()
        .args(["get", "acme-only", "--email", "dev@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "preset.kubermatic.k8c.io \"acme-only\" not found",
        ));
}

/// Fakeプロバイダーへのバインドを確認
#[test]
fn test_bind_fake_credentials() {
    let project = applied_project();

    project
        .cmd()
        .args([
            "bind",
            "shared-fake",
            "--provider",
            "fake",
            "--email",
            "dev@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-token"));
}

/// プロバイダーのクレデンシャルがないプリセットのバインドエラー
#[test]
fn test_bind_missing_provider_bundle() {
    let project = applied_project();

    project
        .cmd()
        .args([
            "bind",
            "shared-fake",
            "--provider",
            "aws",
            "--email",
            "dev@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "the preset shared-fake doesn't contain credential for AWS provider",
        ));
}

/// プロバイダー未指定のバインドエラー
#[test]
fn test_bind_without_provider() {
    let project = applied_project();

    project
        .cmd()
        .args(["bind", "shared-fake", "--email", "dev@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "can not find provider to set credentials",
        ));
}

/// 未定義のデータセンター指定でエラーになることを確認
#[test]
fn test_bind_unknown_datacenter() {
    let project = applied_project();

    project
        .cmd()
        .args([
            "bind",
            "shared-fake",
            "--provider",
            "fake",
            "--datacenter",
            "nowhere",
            "--email",
            "dev@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("datacenter nowhere is not declared"));
}

/// メールアドレス未指定でエラーになることを確認
#[test]
fn test_missing_email() {
    let project = applied_project();

    project
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no email given"));
}

/// presetflow.tomlのメールアドレスが使われることを確認
#[test]
fn test_email_from_settings_file() {
    let project = applied_project();
    project.write_file("presetflow.toml", "email = \"dev@acme.io\"\n");

    project
        .cmd()
        .args(["list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-only"));
}

/// SSHログイン名の表示を確認
#[test]
fn test_ssh_user() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["ssh-user", "--provider", "aws", "--os", "rhel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ec2-user"));
}

/// OS未指定でエラーになることを確認
#[test]
fn test_ssh_user_without_os() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["ssh-user", "--provider", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no operating system set"));
}

const TWO_SEEDS: &str = r#"
[[seeds]]
name = "eu"
store_dir = "seeds/eu"

[[seeds]]
name = "us"
store_dir = "seeds/us"
"#;

const US_MANIFEST: &str = r#"
preset "us-fake" {
    fake { token "us-token" }
}
"#;

/// 複数シード構成でのlist・apply・bindを確認
#[test]
fn test_multi_seed_list_apply_bind() {
    let project = TestProject::new();
    project.write_file("us.kdl", US_MANIFEST);
    project
        .cmd()
        .args(["apply", "--store", "seeds/us", "-f", "us.kdl"])
        .assert()
        .success();

    project.write_file("presetflow.toml", TWO_SEEDS);
    project.write_manifest(MANIFEST);
    project
        .cmd()
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 created"));

    project
        .cmd()
        .args(["list", "--email", "dev@example.com", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-fake"))
        .stdout(predicate::str::contains("us-fake"));

    project
        .cmd()
        .args([
            "bind",
            "us-fake",
            "--provider",
            "fake",
            "--email",
            "dev@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("us-token"));
}

/// セカンダリシードのプリセットはそのシードで更新されることを確認
#[test]
fn test_multi_seed_apply_updates_secondary_seed() {
    let project = TestProject::new();
    project.write_file("us.kdl", US_MANIFEST);
    project
        .cmd()
        .args(["apply", "--store", "seeds/us", "-f", "us.kdl"])
        .assert()
        .success();
    project.write_file("presetflow.toml", TWO_SEEDS);

    let rotated = project.write_file(
        "rotate.kdl",
        r#"
preset "us-fake" {
    fake { token "rotated-token" }
}
"#,
    );
    project
        .cmd()
        .arg("apply")
        .arg("-f")
        .arg(&rotated)
        .assert()
        .success()
        .stdout(predicate::str::contains("us-fake updated"))
        .stdout(predicate::str::contains("0 created, 1 updated, 0 unchanged"));

    project
        .cmd()
        .args([
            "bind",
            "us-fake",
            "--provider",
            "fake",
            "--email",
            "dev@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rotated-token"));

    // 更新は所有シードに書かれ、プライマリには複製されない
    project
        .cmd()
        .args(["list", "--store", "seeds/eu", "--email", "dev@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No presets visible to dev@example.com"));
}

/// 読めないシードは警告として表示され、見つからないプリセットはストアエラーになることを確認
#[test]
fn test_multi_seed_unreadable_seed() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);
    project
        .cmd()
        .args(["apply", "--store", "seeds/eu"])
        .assert()
        .success();

    std::fs::create_dir_all(project.path().join("seeds/us")).unwrap();
    project.write_file("seeds/us/presets.json", "not json");
    project.write_file("presetflow.toml", TWO_SEEDS);

    project
        .cmd()
        .args(["list", "--email", "dev@example.com", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-fake"))
        .stderr(predicate::str::contains("seed us skipped"));

    project
        .cmd()
        .args(["get", "us-only", "--email", "dev@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preset store unavailable"))
        .stderr(predicate::str::contains("not found").not());
}

