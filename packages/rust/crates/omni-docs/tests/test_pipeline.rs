#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use omni_docs::llm::{
    Classification, Generation, GenerationRequest, Generator, Judge, LabelSet, MOCK_DOC_TEXT,
    MockGenerator, MockJudge, Usage,
};
use omni_docs::{DocPipeline, DocsConfig, DocsError, LlmError, RunContext};
use tempfile::TempDir;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write source");
    path
}

fn copy_fixture(dir: &Path, name: &str) -> PathBuf {
    let content =
        std::fs::read_to_string(Path::new(FIXTURES).join(name)).expect("read fixture");
    write_file(dir, name, &content)
}

fn config() -> DocsConfig {
    DocsConfig {
        mock: true,
        max_edits: None,
        ..DocsConfig::default()
    }
}

fn mock_pipeline(config: DocsConfig, reply: &str) -> DocPipeline {
    DocPipeline::new(
        config,
        Box::new(MockGenerator::with_text(reply)),
        Box::new(MockJudge),
    )
}

/// Answers with the first label that does not let the edit through.
struct RejectingJudge;

#[async_trait]
impl Judge for RejectingJudge {
    async fn classify(
        &self,
        _prompt: &str,
        labels: &LabelSet,
    ) -> Result<Classification, LlmError> {
        let veto = labels
            .labels()
            .iter()
            .find(|label| label.name != labels.accepting())
            .map(|label| label.name.to_string());
        Ok(Classification {
            answer: veto.clone().unwrap_or_default(),
            label: veto,
            usage: Usage::priced(10, 1.0),
        })
    }
}

struct FailingGenerator;

/// Replies normally but removes the source directory first, so the write fails.
struct VanishingDirGenerator {
    dir: PathBuf,
}

#[async_trait]
impl Generator for VanishingDirGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, LlmError> {
        let _ = std::fs::remove_dir_all(&self.dir);
        MockGenerator::default().generate(request).await
    }
}

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Generation, LlmError> {
        Err(LlmError::Empty)
    }
}

#[tokio::test]
async fn class_members_get_indented_jsdoc() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(
        tmp.path(),
        "greeter.ts",
        "export class Greeter {\n  greet(name: string): string {\n    return name;\n  }\n}\n",
    );

    let pipeline = DocPipeline::from_config(config());
    let mut ctx = RunContext::new(None);
    let stats = pipeline
        .add_missing_docs(&path, &mut ctx)
        .await
        .expect("missing pass");

    assert_eq!(stats.generated, 2);
    let written = std::fs::read_to_string(&path).expect("read back");
    let expected = format!(
        "/**\n * {MOCK_DOC_TEXT}\n */\nexport class Greeter {{\n  /**\n   * {MOCK_DOC_TEXT}\n   */\n  greet(name: string): string {{\n    return name;\n  }}\n}}\n"
    );
    assert_eq!(written, expected);
}

#[tokio::test]
async fn dry_run_keeps_file_and_returns_diff() {
    let tmp = TempDir::new().expect("tempdir");
    let source = "export function one(): number {\n  return 1;\n}\n";
    let path = write_file(tmp.path(), "one.ts", source);

    let pipeline = DocPipeline::from_config(DocsConfig {
        dry_run: true,
        ..config()
    });
    let summary = pipeline.run(&[path.clone()]).await.expect("run");

    assert_eq!(std::fs::read_to_string(&path).expect("read back"), source);
    let diffs: Vec<&str> = summary.diffs().collect();
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].contains(&format!("+ * {MOCK_DOC_TEXT}")));
}

#[tokio::test]
async fn python_fixture_is_fully_documented_by_one_pass() {
    let tmp = TempDir::new().expect("tempdir");
    let path = copy_fixture(tmp.path(), "python-without-docs.py");

    let pipeline = DocPipeline::from_config(config());
    let mut ctx = RunContext::new(None);
    let first = pipeline
        .add_missing_docs(&path, &mut ctx)
        .await
        .expect("missing pass");
    assert_eq!(first.generated, 9);

    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.contains(&format!(
        "class MyClass:\n    \"\"\"{MOCK_DOC_TEXT}\"\"\"\n    class_variable = 42"
    )));
    assert!(written.contains(&format!(
        "    def __init__(self, value):\n        \"\"\"{MOCK_DOC_TEXT}\"\"\"\n        self.value = value"
    )));
    assert!(written.contains("    def inner_function():\n        return"));

    let second = pipeline
        .add_missing_docs(&path, &mut ctx)
        .await
        .expect("second missing pass");
    assert_eq!(second.generated, 0);
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), written);
}

#[tokio::test]
async fn no_change_reply_leaves_docstrings_alone() {
    let tmp = TempDir::new().expect("tempdir");
    let path = copy_fixture(tmp.path(), "python-with-docs.py");
    let before = std::fs::read_to_string(&path).expect("read");

    let pipeline = mock_pipeline(config(), "NO_CHANGE");
    let mut ctx = RunContext::new(None);
    let stats = pipeline.update_docs(&path, &mut ctx).await.expect("update");

    assert_eq!(stats.skipped, 9);
    assert_eq!(stats.updated, 0);
    assert_eq!(ctx.edits(), 0);
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), before);
}

#[tokio::test]
async fn csharp_multi_line_comment_is_replaced_as_a_unit() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(
        tmp.path(),
        "Calc.cs",
        "public class Calc\n{\n    /// <summary>\n    /// Adds.\n    /// </summary>\n    public int Add(int a, int b) => a + b;\n}\n",
    );

    let pipeline = mock_pipeline(
        config(),
        "<summary>\nAdds two integers.\n</summary>\n<returns>The sum.</returns>",
    );
    let mut ctx = RunContext::new(None);
    let stats = pipeline.update_docs(&path, &mut ctx).await.expect("update");

    assert_eq!(stats.updated, 1);
    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        "public class Calc\n{\n    /// <summary>\n    /// Adds two integers.\n    /// </summary>\n    /// <returns>The sum.</returns>\n    public int Add(int a, int b) => a + b;\n}\n"
    );
}

#[tokio::test]
async fn update_runs_before_missing() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(
        tmp.path(),
        "mod.py",
        "def old():\n    \"\"\"Old.\"\"\"\n    return 1\n\n\ndef new():\n    return 2\n",
    );

    let pipeline = DocPipeline::from_config(DocsConfig {
        update: true,
        ..config()
    });
    let summary = pipeline.run(&[path.clone()]).await.expect("run");

    let modes: Vec<&str> = summary.files.iter().map(|s| s.mode.as_str()).collect();
    assert_eq!(modes, vec!["update", "missing"]);
    assert_eq!(summary.files[0].updated, 1);
    assert_eq!(summary.files[1].generated, 1);
    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        format!(
            "def old():\n    \"\"\"{MOCK_DOC_TEXT}\"\"\"\n    return 1\n\n\ndef new():\n    \"\"\"{MOCK_DOC_TEXT}\"\"\"\n    return 2\n"
        )
    );
}

#[tokio::test]
async fn edit_budget_stops_the_run() {
    let tmp = TempDir::new().expect("tempdir");
    let first = write_file(tmp.path(), "a.ts", "function a() {}\nfunction b() {}\n");
    let second_source = "function c() {}\n";
    let second = write_file(tmp.path(), "b.ts", second_source);

    let pipeline = DocPipeline::from_config(DocsConfig {
        max_edits: Some(1),
        ..config()
    });
    let summary = pipeline
        .run(&[first.clone(), second.clone()])
        .await
        .expect("run");

    assert_eq!(summary.total_edits(), 1);
    assert!(summary.budget_exhausted);
    assert_eq!(summary.files.len(), 1);
    let written = std::fs::read_to_string(&first).expect("read back");
    assert_eq!(written.matches("/**").count(), 1);
    assert!(written.contains("function b() {}"));
    assert_eq!(std::fs::read_to_string(&second).expect("read back"), second_source);
}

#[tokio::test]
async fn judge_veto_is_counted_and_nothing_is_written() {
    let tmp = TempDir::new().expect("tempdir");
    let source = "def f(x):\n    return x\n";
    let path = write_file(tmp.path(), "f.py", source);

    let pipeline = DocPipeline::new(
        config(),
        Box::new(MockGenerator::default()),
        Box::new(RejectingJudge),
    );
    let mut ctx = RunContext::new(None);
    let stats = pipeline
        .add_missing_docs(&path, &mut ctx)
        .await
        .expect("missing pass");

    assert_eq!(stats.refused, 1);
    assert_eq!(stats.generated, 0);
    assert_eq!(stats.judge.total_tokens, 10);
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), source);
}

#[tokio::test]
async fn judge_can_be_disabled() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(tmp.path(), "f.py", "def f(x):\n    return x\n");

    let pipeline = DocPipeline::new(
        DocsConfig {
            judge: false,
            ..config()
        },
        Box::new(MockGenerator::default()),
        Box::new(RejectingJudge),
    );
    let mut ctx = RunContext::new(None);
    let stats = pipeline
        .add_missing_docs(&path, &mut ctx)
        .await
        .expect("missing pass");

    assert_eq!(stats.generated, 1);
    assert_eq!(stats.judge, Usage::default());
}

#[tokio::test]
async fn generation_failures_skip_declarations() {
    let tmp = TempDir::new().expect("tempdir");
    let source = "function a() {}\nfunction b() {}\n";
    let path = write_file(tmp.path(), "a.ts", source);

    let pipeline = DocPipeline::new(config(), Box::new(FailingGenerator), Box::new(MockJudge));
    let summary = pipeline.run(&[path.clone()]).await.expect("run");

    assert_eq!(summary.files[0].failed, 2);
    assert_eq!(summary.total_edits(), 0);
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), source);
}

#[tokio::test]
async fn unreadable_files_do_not_abort_the_run() {
    let tmp = TempDir::new().expect("tempdir");
    let missing = tmp.path().join("gone.ts");
    let present = write_file(tmp.path(), "here.ts", "function here() {}\n");

    let pipeline = DocPipeline::from_config(config());
    let summary = pipeline
        .run(&[missing, present.clone()])
        .await
        .expect("run");

    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].generated, 1);
}

#[tokio::test]
async fn run_without_a_mode_is_rejected() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(tmp.path(), "a.ts", "function a() {}\n");

    let pipeline = DocPipeline::from_config(DocsConfig {
        missing: false,
        update: false,
        ..config()
    });
    assert!(matches!(
        pipeline.run(&[path]).await,
        Err(DocsError::NoMode)
    ));
}

#[tokio::test]
async fn non_utf8_file_is_skipped_untouched() {
    let tmp = TempDir::new().expect("tempdir");
    let bad = tmp.path().join("latin1.ts");
    let bytes = b"const s = \"caf\xE9\";\nfunction f() {}\n";
    std::fs::write(&bad, bytes).expect("write source");
    let good = write_file(tmp.path(), "good.ts", "function g() {}\n");

    let pipeline = DocPipeline::from_config(config());
    let summary = pipeline
        .run(&[bad.clone(), good.clone()])
        .await
        .expect("run");

    assert_eq!(std::fs::read(&bad).expect("read back"), bytes.to_vec());
    assert_eq!(summary.failed_files, vec![bad.display().to_string()]);
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].generated, 1);
    assert!(
        std::fs::read_to_string(&good)
            .expect("read back")
            .starts_with("/**")
    );
}

#[tokio::test]
async fn csharp_plain_comment_survives_update() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(
        tmp.path(),
        "Calc.cs",
        "public class Calc\n{\n    // Arithmetic helpers\n    /// <summary>Adds.</summary>\n    public int Add(int a, int b) => a + b;\n}\n",
    );

    let pipeline = mock_pipeline(config(), "<summary>Adds two ints.</summary>");
    let mut ctx = RunContext::new(None);
    let stats = pipeline.update_docs(&path, &mut ctx).await.expect("update");

    assert_eq!(stats.updated, 1);
    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        "public class Calc\n{\n    // Arithmetic helpers\n    /// <summary>Adds two ints.</summary>\n    public int Add(int a, int b) => a + b;\n}\n"
    );
}

#[tokio::test]
async fn failed_write_is_not_counted_against_the_budget() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path().join("src");
    std::fs::create_dir(&dir).expect("mkdir");
    let path = write_file(&dir, "a.ts", "function a() {}\n");

    let pipeline = DocPipeline::new(
        config(),
        Box::new(VanishingDirGenerator { dir: dir.clone() }),
        Box::new(MockJudge),
    );
    let mut ctx = RunContext::new(Some(5));
    let result = pipeline.add_missing_docs(&path, &mut ctx).await;

    assert!(matches!(result, Err(DocsError::Edit(_))));
    assert_eq!(ctx.edits(), 0);
    assert_eq!(ctx.remaining(), Some(5));
}

#[tokio::test]
async fn budget_used_exactly_is_not_reported_as_exhausted() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_file(tmp.path(), "a.ts", "function a() {}\n");
    let nothing = write_file(tmp.path(), "b.ts", "a + 1;\n");

    let pipeline = DocPipeline::from_config(DocsConfig {
        max_edits: Some(1),
        ..config()
    });
    let summary = pipeline.run(&[path, nothing]).await.expect("run");

    assert_eq!(summary.total_edits(), 1);
    assert!(!summary.budget_exhausted);
}
