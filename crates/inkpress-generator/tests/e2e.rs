//! End-to-end tests for inkpress.
//!
//! These tests build small sites against the bundled templates and inspect
//! the generated files.

use std::{fs, path::Path};

use inkpress_generator::{BuildError, BuildOptions, Builder};
use tempfile::TempDir;

const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

const SETTINGS: &str =
    "---\ntitle: My Blog\nurl: http://example.com\nxmlurl: http://example.com/index.xml\n---\n";

fn site(posts: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("create source dir");
    fs::write(dir.path().join("_index.md"), SETTINGS).expect("write settings");
    for (name, content) in posts {
        fs::write(dir.path().join(name), content).expect("write post");
    }
    dir
}

fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative)).expect("read output")
}

#[test]
fn test_single_post_site() {
    let source = site(&[(
        "hello.md",
        "---\ntitle: Hello\ndate: 2021-05-01\n---\n# Hi\n",
    )]);
    let output = TempDir::new().unwrap();

    let stats = Builder::new(TEMPLATES, source.path(), output.path())
        .build()
        .expect("build should succeed");
    assert_eq!(stats.posts, 1);

    let index = read(output.path(), "index.html");
    assert!(index.contains(r#"<a href="http://example.com/post/hello.html">Hello</a>"#));

    let post = read(output.path(), "post/hello.html");
    assert!(post.contains("<h1>Hi</h1>"));
    assert!(post.contains("<title>Hello | My Blog</title>"));

    let feed = read(output.path(), "index.xml");
    assert!(feed.contains("<title>My Blog</title>"));
    assert!(feed.contains("<guid>http://example.com/post/hello.html</guid>"));
    assert!(feed.contains("<pubDate>Sat, 1 May 2021 00:00:00 +0000</pubDate>"));
}

#[test]
fn test_rebuild_is_byte_identical() {
    let source = site(&[
        ("a.md", "---\ntitle: A\ndate: 2021-02-03\n---\nalpha *text*\n"),
        ("b.md", "---\ntitle: B\n---\nbeta\n"),
    ]);
    let output = TempDir::new().unwrap();
    let builder = Builder::new(TEMPLATES, source.path(), output.path());

    builder.build().expect("first build");
    let first = (
        read(output.path(), "index.html"),
        read(output.path(), "post/a.html"),
        read(output.path(), "post/b.html"),
    );

    builder.build().expect("second build");
    let second = (
        read(output.path(), "index.html"),
        read(output.path(), "post/a.html"),
        read(output.path(), "post/b.html"),
    );

    assert_eq!(first, second);
}

#[test]
fn test_newest_post_listed_first() {
    let source = site(&[
        ("january.md", "---\ntitle: January\ndate: 2020-01-01\n---\nwinter\n"),
        ("june.md", "---\ntitle: June\ndate: 2020-06-01\n---\nsummer\n"),
    ]);
    let output = TempDir::new().unwrap();

    Builder::new(TEMPLATES, source.path(), output.path())
        .build()
        .expect("build should succeed");

    let index = read(output.path(), "index.html");
    let june = index.find("June").expect("june listed");
    let january = index.find("January").expect("january listed");
    assert!(june < january);

    let feed = read(output.path(), "index.xml");
    assert!(feed.contains("<pubDate>Mon, 1 Jun 2020 00:00:00 +0000</pubDate>"));
    assert!(feed.find("June").unwrap() < feed.find("January").unwrap());
}

#[test]
fn test_feed_escapes_titles_and_excerpts() {
    let source = site(&[(
        "amp.md",
        "---\ntitle: Fish & Chips\n---\nSalt & <vinegar>\n",
    )]);
    let output = TempDir::new().unwrap();

    Builder::new(TEMPLATES, source.path(), output.path())
        .build()
        .expect("build should succeed");

    let feed = read(output.path(), "index.xml");
    assert!(feed.contains("<title>Fish &amp; Chips</title>"));
    assert!(feed.contains("<description>Salt &amp; &lt;vinegar&gt;</description>"));
}

#[test]
fn test_malformed_post_fails_build() {
    let source = site(&[
        ("good.md", "---\ntitle: Good\n---\nfine\n"),
        ("broken.md", "no frontmatter at all\n"),
    ]);
    let output = TempDir::new().unwrap();

    let err = Builder::new(TEMPLATES, source.path(), output.path())
        .build()
        .unwrap_err();

    assert!(matches!(err, BuildError::Core(_)));
    assert!(err.to_string().contains("broken.md"));
    assert!(!output.path().join("index.html").exists());
}

#[test]
fn test_missing_templates_dir_fails_build() {
    let source = site(&[]);
    let output = TempDir::new().unwrap();

    let err = Builder::new(source.path().join("nope"), source.path(), output.path())
        .build()
        .unwrap_err();

    assert!(matches!(err, BuildError::Template(_)));
}

#[test]
fn test_skip_drafts_hides_drafts_everywhere() {
    let source = site(&[
        ("draft.md", "---\ntitle: Secret\ndraft: true\n---\nwip\n"),
        ("public.md", "---\ntitle: Public\n---\nout\n"),
    ]);
    let output = TempDir::new().unwrap();

    Builder::new(TEMPLATES, source.path(), output.path())
        .with_options(BuildOptions { skip_drafts: true })
        .build()
        .expect("build should succeed");

    assert!(!output.path().join("post/draft.html").exists());
    assert!(!read(output.path(), "index.html").contains("Secret"));
    assert!(!read(output.path(), "index.xml").contains("Secret"));
    assert!(read(output.path(), "index.xml").contains("Public"));
}
