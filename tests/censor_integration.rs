//! End-to-end tests for the censoring pipeline.
//!
//! Fixtures mirror the shapes a real redaction run encounters: public and
//! package-private classes and interfaces, mixed-visibility members, and
//! nested types. Every assertion runs against the rendered output, which
//! is re-parsed and re-lowered so the checks see what a consumer would.

use java_censor::{censor_source, is_marker, lower_source, CensorConfig, DeclKind, JavaParser};
use proptest::prelude::*;

fn censor(source: &str) -> String {
    censor_source(source, &CensorConfig::default()).unwrap()
}

/// Re-parse censored output and lower it, asserting syntactic validity.
fn reparse(output: &str) -> java_censor::DeclTree {
    let mut parser = JavaParser::new().unwrap();
    let parsed = parser.parse_with_source(output).unwrap();
    assert!(
        !parsed.has_errors(),
        "censored output must stay valid Java:\n{output}"
    );
    lower_source(&parsed)
}

fn has_marker_comment(output: &str) -> bool {
    output.lines().any(|line| {
        line.trim()
            .strip_prefix("//")
            .is_some_and(|rest| is_marker(rest))
    })
}

fn member_counts(tree: &java_censor::DeclTree, id: java_censor::DeclId) -> (usize, usize, usize) {
    (
        tree.members_of_kind(id, DeclKind::Method).len(),
        tree.members_of_kind(id, DeclKind::Field).len(),
        tree.members_of_kind(id, DeclKind::Constructor).len(),
    )
}

#[test]
fn public_class_with_private_field_is_emptied_and_marked() {
    let output = censor(
        r#"
public class TestClass {

    private String testField = "test";

}
"#,
    );
    let tree = reparse(&output);
    let class = tree.roots()[0];
    assert_eq!(member_counts(&tree, class), (0, 0, 0));
    assert!(has_marker_comment(&output));
    assert!(!output.contains("testField"));
}

#[test]
fn public_field_survives_and_no_marker_is_added() {
    let output = censor(
        r#"
public class TestClass {

    public String testField = "test";

}
"#,
    );
    let tree = reparse(&output);
    let class = tree.roots()[0];
    assert_eq!(member_counts(&tree, class), (0, 1, 0));
    assert!(output.contains("public String testField = \"test\";"));
    assert!(!has_marker_comment(&output));
}

#[test]
fn public_method_keeps_signature_with_a_single_throw_body() {
    let output = censor(
        r#"
public class TestClass {

    /**
     * Test public, return String
     */
    public String test(Object object) {
        System.out.println("asdf");
        return "asdf";
    }

}
"#,
    );
    let tree = reparse(&output);
    let class = tree.roots()[0];
    let methods = tree.members_of_kind(class, DeclKind::Method);
    assert_eq!(methods.len(), 1);
    assert_eq!(tree.get(methods[0]).name.as_deref(), Some("test"));

    // Doc comment and signature survive, the implementation does not
    assert!(output.contains("Test public, return String"));
    assert!(output.contains("public String test(Object object)"));
    assert!(!output.contains("System.out.println"));
    assert!(!output.contains("return \"asdf\""));

    assert_stub_body(&output, "test");
}

#[test]
fn local_class_loses_everything_including_public_members() {
    let output = censor(
        r#"
class TestClass {

    int field2;
    public double field3;

    public TestClass() {
        System.out.println("lolo");
    }

    /**
     * Test public
     */
    public void test1() {
        System.out.println("asdf");
    }

}
"#,
    );
    let tree = reparse(&output);
    let class = tree.roots()[0];
    assert_eq!(member_counts(&tree, class), (0, 0, 0));
    assert!(has_marker_comment(&output));
    assert!(!output.contains("field3"));
    assert!(!output.contains("test1"));
}

#[test]
fn public_interface_members_are_untouched() {
    let source = r#"
public interface TestInterface {

    String constant = "constant";

    /**
     * More public interfaces
     */
    void test();

}
"#;
    let output = censor(source);
    let tree = reparse(&output);
    let iface = tree.roots()[0];
    assert_eq!(tree.get(iface).kind, DeclKind::Interface);
    assert_eq!(tree.members_of_kind(iface, DeclKind::Field).len(), 1);
    assert_eq!(tree.members_of_kind(iface, DeclKind::Method).len(), 1);
    assert!(output.contains("String constant = \"constant\";"));
    assert!(output.contains("void test();"));
    assert!(!has_marker_comment(&output));
}

#[test]
fn local_interface_is_stripped_and_marked() {
    let output = censor(
        r#"
interface TestInterface {

    String constant = "constant";

    /**
     * More public interfaces
     */
    void test();

}
"#,
    );
    let tree = reparse(&output);
    let iface = tree.roots()[0];
    assert_eq!(member_counts(&tree, iface), (0, 0, 0));
    assert!(has_marker_comment(&output));
    assert!(!output.contains("void test()"));
}

/// The stubbed body of the named method consists of exactly one statement,
/// a throw of a runtime exception built with one string-literal argument.
fn assert_stub_body(output: &str, method_name: &str) {
    let mut parser = JavaParser::new().unwrap();
    let parsed = parser.parse_with_source(output).unwrap();

    let mut stack = vec![parsed.root_node()];
    while let Some(node) = stack.pop() {
        if node.kind() == "method_declaration" {
            let name = node
                .child_by_field_name("name")
                .map(|n| parsed.node_text(n))
                .unwrap_or("");
            if name == method_name {
                let body = node
                    .child_by_field_name("body")
                    .expect("stub must have a body");
                let mut statements = Vec::new();
                let mut cursor = body.walk();
                for child in body.named_children(&mut cursor) {
                    if !matches!(child.kind(), "line_comment" | "block_comment") {
                        statements.push(child);
                    }
                }
                assert_eq!(statements.len(), 1, "stub body must hold one statement");
                assert_eq!(statements[0].kind(), "throw_statement");
                let text = parsed.node_text(statements[0]);
                assert!(text.contains("new java.lang.RuntimeException(\""));
                return;
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }
    panic!("method {method_name} not found in output");
}

#[test]
fn nested_public_class_in_local_host_is_processed_independently() {
    let output = censor(
        r#"
class Host {

    private int hidden;

    public static class Api {
        public int call() { return 1; }
        private int impl() { return 2; }
    }

}
"#,
    );
    let tree = reparse(&output);
    let host = tree.roots()[0];
    assert_eq!(member_counts(&tree, host), (0, 0, 0));

    let nested = tree.members_of_kind(host, DeclKind::Class);
    assert_eq!(nested.len(), 1);
    let api = nested[0];
    assert_eq!(tree.members_of_kind(api, DeclKind::Method).len(), 1);
    assert!(output.contains("public int call()"));
    assert!(!output.contains("impl()"));
    // Host is empty of counted members, so it carries a marker even though
    // the nested type survived
    assert!(has_marker_comment(&output));
}

#[test]
fn placeholders_rotate_through_stubbed_bodies_in_order() {
    let config = CensorConfig {
        placeholders: vec!["first".into(), "second".into()],
        ..CensorConfig::default()
    };
    let output = censor_source(
        r#"
public class Rotating {
    public void a() { }
    public void b() { }
    public void c() { }
}
"#,
        &config,
    )
    .unwrap();

    let first = output.find("RuntimeException(\"first\")").unwrap();
    let second = output.find("RuntimeException(\"second\")").unwrap();
    let third = output.rfind("RuntimeException(\"first\")").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn censoring_twice_duplicates_markers_but_removes_nothing_more() {
    let source = r#"
public class Husk {
    private int gone;
}
"#;
    let once = censor(source);
    let twice = censor(&once);

    let count = |s: &str| s.matches("// Source removed").count();
    // Documented non-idempotence of annotation: second run appends another
    // marker block to the still-empty type
    assert_eq!(count(&twice), count(&once) * 2);

    let tree = reparse(&twice);
    let class = tree.roots()[0];
    assert_eq!(member_counts(&tree, class), (0, 0, 0));
}

#[test]
fn stable_output_for_sources_without_empty_types() {
    let source = r#"
public class Stable {
    public int keep = 1;
    public int get() { return keep; }
}
"#;
    let once = censor(source);
    let twice = censor(&once);
    assert_eq!(once, twice);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn censoring_generated_classes_is_total_and_valid(
        class_public in any::<bool>(),
        members in prop::collection::vec((0usize..3, any::<bool>()), 0..6),
    ) {
        let mut body = String::new();
        for (i, &(kind, public)) in members.iter().enumerate() {
            let vis = if public { "public" } else { "private" };
            match kind {
                0 => body.push_str(&format!("    {vis} int field{i} = {i};\n")),
                1 => body.push_str(&format!("    {vis} int method{i}() {{ return {i}; }}\n")),
                _ => body.push_str(&format!("    {vis} Subject(long arg{i}) {{ }}\n")),
            }
        }
        let class_vis = if class_public { "public " } else { "" };
        let source = format!("{class_vis}class Subject {{\n{body}}}\n");

        let output = censor(&source);
        let tree = reparse(&output);
        let class = tree.roots()[0];

        for (i, &(kind, public)) in members.iter().enumerate() {
            let kept = class_public && public;
            let name = match kind {
                0 => format!("field{i}"),
                1 => format!("method{i}"),
                _ => format!("arg{i}"),
            };
            prop_assert_eq!(output.contains(&name), kept, "member {}: {}", i, name);
        }

        // An emptied class always carries a marker
        if tree.counted_member_len(class) == 0 {
            prop_assert!(has_marker_comment(&output));
        }
    }
}
