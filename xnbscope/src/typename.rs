//! Qualified type and reader name handling.
//!
//! Names in an XNB manifest are CLR-style qualified names: a dotted type name, an optional
//! backtick arity marker with a bracketed generic argument list, and optional assembly metadata
//! after a comma (`Version=...`, `PublicKeyToken=...` and friends). The registry keys readers by
//! the *normalized* form — assembly metadata stripped, structure preserved — so the two functions
//! here are the identity layer of the whole resolution mechanism.
//!
//! Both functions are total and side-effect free.

/// Remove every assembly-metadata tail from a qualified name.
///
/// Maps `"Foo, Version=1.0"` to `"Foo"` and `` "List`1[[Bar, mscorlib]], Xna" `` to
/// `` "List`1[[Bar]]" ``. A comma immediately followed by `[` is the separator inside a generic
/// argument list (`],[`) and is preserved; any other comma starts metadata, which is deleted up
/// to the next `]` or to the end of the string.
///
/// The operation is idempotent: normalizing a normalized name is a no-op.
#[must_use]
pub fn strip_assembly_version(name: &str) -> String {
    let mut name = name.to_string();
    let mut search = 0;

    while let Some(comma) = name[search..].find(',').map(|i| i + search) {
        if name.as_bytes().get(comma + 1) == Some(&b'[') {
            // Skip past the comma in the ],[ part of a generic type argument list.
            search = comma + 1;
        } else {
            // Strip trailing assembly version information after other commas.
            match name[comma..].find(']').map(|i| i + comma) {
                Some(close) => {
                    name.replace_range(comma..close, "");
                    search = comma;
                }
                None => {
                    name.truncate(comma);
                    search = comma;
                }
            }
        }
    }

    name
}

/// Split a generic name into its open name and ordered argument list.
///
/// Splits `` "Foo`2[[Bar],[Baz]]" `` into `("Foo", ["Bar", "Baz"])`. Arguments may themselves be
/// generic; nesting is tracked by bracket depth, so `` "List`1[[List`1[[Int]]]]" `` yields the
/// inner list name as its single argument. Returns `None` when the name carries no backtick
/// marker, i.e. is not generic.
///
/// Expects a normalized name (see [`strip_assembly_version`]). The `],[` separators between
/// arguments are skipped with individual guards, so malformed but recognizable input still
/// yields its tokens.
#[must_use]
pub fn split_generic_name(name: &str) -> Option<(String, Vec<String>)> {
    let bytes = name.as_bytes();

    // Everything to the left of ` is the open generic name.
    let tick = name.find('`')?;
    let open_name = name[..tick].to_string();

    // Advance past the declared arity and into the argument list.
    let mut pos = tick + 1;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }

    while pos < bytes.len() && bytes[pos] == b'[' {
        pos += 1;
    }

    let mut arguments = Vec::new();

    while pos < bytes.len() && bytes[pos] != b']' {
        // Locate the end of the current argument: the next ] at nesting depth 0.
        let mut nesting = 0;
        let mut end = pos;

        while end < bytes.len() {
            match bytes[end] {
                b'[' => nesting += 1,
                b']' => {
                    if nesting > 0 {
                        nesting -= 1;
                    } else {
                        break;
                    }
                }
                _ => {}
            }
            end += 1;
        }

        arguments.push(name[pos..end].to_string());

        // Skip past the argument, plus any subsequent "],[" separator.
        pos = end;

        if pos < bytes.len() && bytes[pos] == b']' {
            pos += 1;
        }

        if pos < bytes.len() && bytes[pos] == b',' {
            pos += 1;
        }

        if pos < bytes.len() && bytes[pos] == b'[' {
            pos += 1;
        }
    }

    Some((open_name, arguments))
}
