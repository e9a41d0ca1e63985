//! Kotlin source synthesis.
//!
//! Every generated file embeds the harness's random token as a property
//! default, so file contents differ between harness instances even when the
//! layout (and therefore every file name) is identical. That keeps the build
//! cache from reusing task outputs across separate test runs.

/// The magic number injected into defect-bearing files. Any nonzero literal
/// the plugin's magic-number rule flags would do; clean files get `0`, which
/// the rule ignores.
pub const SMELLY_CONSTANT: i32 = 11;

/// Synthesize a minimal Kotlin class definition.
///
/// Pure: the output depends only on the arguments. Writing the file to disk
/// is the harness's job.
pub fn kotlin_class(class_name: &str, token: &str, with_smell: bool) -> String {
    let smelly = if with_smell { SMELLY_CONSTANT } else { 0 };
    format!(
        "internal class {class_name}(\n    \
         val randomDefaultValue: String = \"{token}\"\n\
         ) {{\n    \
         val smellyConstant: Int = {smelly}\n\
         }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_class_carries_zero_constant() {
        let source = kotlin_class("My0Root0Class", "token-a", false);
        assert!(source.contains("internal class My0Root0Class"));
        assert!(source.contains("val randomDefaultValue: String = \"token-a\""));
        assert!(source.contains("val smellyConstant: Int = 0"));
    }

    #[test]
    fn smelly_class_carries_magic_number() {
        let source = kotlin_class("My0Root0Class", "token-a", true);
        assert!(source.contains(&format!("val smellyConstant: Int = {SMELLY_CONSTANT}")));
    }

    #[test]
    fn same_inputs_same_output() {
        assert_eq!(
            kotlin_class("A", "t", true),
            kotlin_class("A", "t", true),
        );
    }

    #[test]
    fn token_is_the_only_cross_instance_difference() {
        let a = kotlin_class("A", "token-a", false);
        let b = kotlin_class("A", "token-b", false);
        assert_ne!(a, b);
        assert_eq!(a.replace("token-a", "token-b"), b);
    }
}
