//! Heuristic scanning of a Terraform `templatefile(...)` call and the script it renders.
//!
//! Neither file is parsed. The configuration is searched for the first
//! `templatefile(<path>, { ... })` call and the keys of its mapping literal are
//! taken as the declared variables; the script is searched for `${name}`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

// `templatefile(`, the path expression up to the first comma, then a mapping
// literal whose closing brace is directly followed by `)`. Lazy so values like
// "${var.x}" do not end the block early; an empty mapping is not a block.
static TEMPLATEFILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)templatefile\([^,]*,\s*\{(.+?)\}\s*\)").unwrap());

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*=").unwrap());

/// The mapping literal of the first `templatefile(...)` call in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBlock<'a> {
    body: &'a str,
}

impl<'a> TemplateBlock<'a> {
    /// Text between the mapping's braces.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Every `name =` key inside the mapping, deduplicated.
    pub fn declared_variables(&self) -> BTreeSet<String> {
        DECLARATION_RE
            .captures_iter(self.body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Locates the first `templatefile(...)` call. Later calls are ignored.
pub fn find_template_block(config: &str) -> Option<TemplateBlock<'_>> {
    let body = TEMPLATEFILE_RE.captures(config)?.get(1)?;
    Some(TemplateBlock {
        body: body.as_str(),
    })
}

/// True when `script` contains the exact interpolation `${name}`.
///
/// Bare `$name`, escaped `$${name}` and commented-out lines are not told apart.
pub fn is_referenced(script: &str, name: &str) -> bool {
    script.contains(&format!("${{{name}}}"))
}

/// Declared names that the script never interpolates, in the order of `declared`.
pub fn unused_variables<'a, I>(declared: I, script: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    declared
        .into_iter()
        .filter(|name| !is_referenced(script, name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTILINE_CONFIG: &str = r#"resource "aws_instance" "web" {
  ami           = "ami-123"
  instance_type = "t3.micro"

  user_data = templatefile("${path.module}/userdata.sh", {
    region      = var.region
    bucket_name = "${var.prefix}-artifacts"
    log_level   = "info"
  })

  tags = {
    Name = "web"
  }
}
"#;

    fn names(block: &TemplateBlock<'_>) -> Vec<String> {
        block.declared_variables().into_iter().collect()
    }

    #[test]
    fn test_find_single_line_block() {
        let config = r#"x = templatefile("x", { a = 1, b = 2 })"#;
        let block = find_template_block(config).unwrap();
        assert_eq!(block.body(), " a = 1, b = 2 ");
        assert_eq!(names(&block), vec!["a", "b"]);
    }

    #[test]
    fn test_find_multiline_block_with_interpolated_values() {
        let block = find_template_block(MULTILINE_CONFIG).unwrap();
        assert!(block.body().contains("bucket_name"));
        assert!(!block.body().contains("instance_type"));
        assert_eq!(names(&block), vec!["bucket_name", "log_level", "region"]);
    }

    #[test]
    fn test_empty_mapping_is_not_a_block() {
        assert!(find_template_block(r#"x = templatefile("u.sh", {})"#).is_none());
        assert!(find_template_block("x = templatefile(\"u.sh\", {\n})\n").is_some());
    }

    #[test]
    fn test_no_templatefile_call() {
        let config = "resource \"null_resource\" \"x\" {}\n";
        assert!(find_template_block(config).is_none());
    }

    #[test]
    fn test_templatefile_without_mapping() {
        let config = r#"user_data = templatefile("userdata.sh", local.vars)"#;
        assert!(find_template_block(config).is_none());
    }

    #[test]
    fn test_only_first_call_is_used() {
        let config = r#"
a = templatefile("one.sh", { first = 1 })
b = templatefile("two.sh", { second = 2 })
"#;
        let block = find_template_block(config).unwrap();
        assert_eq!(names(&block), vec!["first"]);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let config = r#"templatefile("x", { a = 1, a = 2, b = 3 })"#;
        let block = find_template_block(config).unwrap();
        assert_eq!(block.declared_variables().len(), 2);
    }

    #[test]
    fn test_is_referenced_requires_braces() {
        let script = "echo ${region}\necho $bucket\n";
        assert!(is_referenced(script, "region"));
        assert!(!is_referenced(script, "bucket"));
    }

    #[test]
    fn test_is_referenced_is_exact() {
        let script = "echo ${region_name}";
        assert!(!is_referenced(script, "region"));
        assert!(!is_referenced(script, "name"));
    }

    #[test]
    fn test_unused_variables() {
        let config = r#"templatefile("x", { a = 1, b = 2 })"#;
        let declared = find_template_block(config).unwrap().declared_variables();
        let unused = unused_variables(&declared, "#!/bin/sh\necho ${a}\n");
        assert_eq!(unused, vec!["b".to_string()]);
    }

    #[test]
    fn test_unused_variables_all_used() {
        let declared = find_template_block(MULTILINE_CONFIG)
            .unwrap()
            .declared_variables();
        let script = "aws s3 cp s3://${bucket_name}/app . --region ${region}\nLOG=${log_level}\n";
        assert!(unused_variables(&declared, script).is_empty());
    }
}
