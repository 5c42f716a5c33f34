//! Identifier case conversions

/// Convert an identifier to snake case
///
/// Word boundaries are a lowercase letter or digit followed by an uppercase
/// letter, the last capital of an acronym run that precedes a lowercase
/// letter, and any `-` or whitespace. Namespace separators (`::`) are kept.
#[must_use]
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c.is_whitespace() {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Convert an identifier to upper camel case
///
/// `first_value` becomes `FirstValue`. Only the first character of each
/// segment is touched.
#[must_use]
pub fn camel_case(input: &str) -> String {
    input
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Registry form of a (possibly namespaced) type name
///
/// `Outer::InnerName` becomes `outer_inner_name`.
#[must_use]
pub fn canonical_name(input: &str) -> String {
    snake_case(input).replace("::", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("ParameterStore"), "parameter_store");
        assert_eq!(snake_case("parameter_store"), "parameter_store");
        assert_eq!(snake_case("Key"), "key");
        assert_eq!(snake_case("HTTPResolver"), "http_resolver");
        assert_eq!(snake_case("Ssl2Fast"), "ssl2_fast");
        assert_eq!(snake_case("aws-ssm"), "aws_ssm");
        assert_eq!(snake_case("Outer::Inner"), "outer::inner");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("first_value"), "FirstValue");
        assert_eq!(camel_case("key"), "Key");
        assert_eq!(camel_case("test_resolver"), "TestResolver");
        assert_eq!(camel_case("AlreadyCamel"), "AlreadyCamel");
        assert_eq!(camel_case("vpc-id"), "VpcId");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("Outer::Inner"), "outer_inner");
        assert_eq!(
            canonical_name("Resolvers::ParameterStore"),
            "resolvers_parameter_store"
        );
        assert_eq!(canonical_name("TestResolver"), "test_resolver");
        assert_eq!(canonical_name(&camel_case("test_resolver")), "test_resolver");
    }
}
