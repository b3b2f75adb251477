//! `#{name}` placeholder expansion for compiler argument templates. `##` yields a literal `#`.

use std::ffi::OsStr;

pub type Result = std::result::Result<String, InterpError>;

/// Columns are 1-based character positions of the placeholder's `{`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpError {
    #[error("Undefined variable '{0}' at column {1}")]
    UndefinedVar(String, usize),

    #[error("Unclosed brace at column {0}")]
    UnclosedBrace(usize),
}

/// Expands every placeholder in `template` with `lookup(name)`.
pub fn interp<F, V>(template: &str, mut lookup: F) -> Result
where
    F: FnMut(&str) -> Option<V>,
    V: AsRef<OsStr>,
{
    let mut res = String::with_capacity(template.len());
    let mut chars = template.chars().zip(1usize..).peekable();

    while let Some((c, _)) = chars.next() {
        if c != '#' {
            res.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(('#', _)) => {
                chars.next();
                res.push('#');
            }
            Some(('{', brace_col)) => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some(('}', _)) => break,
                        Some((c, _)) => name.push(c),
                        None => return Err(InterpError::UnclosedBrace(brace_col)),
                    }
                }
                let Some(value) = lookup(&name) else {
                    return Err(InterpError::UndefinedVar(name, brace_col))
                };
                res.push_str(&value.as_ref().to_string_lossy());
            }
            _ => res.push('#'),
        }
    }
    Ok(res)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use maplit::hashmap;

    use super::*;

    fn vars() -> HashMap<&'static str, &'static str> {
        hashmap! {
            "sourcePath" => "subs/alice/main.c",
            "sourceName" => "main.c",
            "exePath" => "/tmp/autograde-x/student.out",
        }
    }

    fn expand(template: &str) -> Result {
        let vars = vars();
        interp(template, |name| vars.get(name).copied())
    }

    #[test]
    fn interp_ok() {
        let vars = vars();

        assert_eq!(expand("-Wall").unwrap(), "-Wall");
        assert_eq!(expand("#{sourcePath}").unwrap(), vars["sourcePath"]);
        assert_eq!(
            expand("-o#{exePath}").unwrap(),
            format!("-o{}", vars["exePath"])
        );
        assert_eq!(
            expand("#{sourceName}#{exePath}").unwrap(),
            format!("{}{}", vars["sourceName"], vars["exePath"])
        );
        assert_eq!(expand("{sourceName}").unwrap(), "{sourceName}");
        assert_eq!(expand("# {sourceName}").unwrap(), "# {sourceName}");
        assert_eq!(expand("#sourceName").unwrap(), "#sourceName");
        assert_eq!(expand("##{sourceName}").unwrap(), "#{sourceName}");
        assert_eq!(expand("-DX=##").unwrap(), "-DX=#");
        assert_eq!(expand("#").unwrap(), "#");
        assert_eq!(expand("##").unwrap(), "#");
        assert_eq!(expand("###").unwrap(), "##");
        assert_eq!(expand("").unwrap(), "");
    }

    #[test]
    fn interp_ng() {
        assert_eq!(
            expand("#{source} -o #{exePath}").unwrap_err(),
            InterpError::UndefinedVar("source".to_owned(), 2)
        );
        assert_eq!(
            expand("#{exePath} #{sourcePath").unwrap_err(),
            InterpError::UnclosedBrace(13),
        );
        assert_eq!(expand("#{").unwrap_err(), InterpError::UnclosedBrace(2));
    }

    #[test]
    fn both_errors_point_at_the_same_brace() {
        assert_eq!(
            expand("#{src}").unwrap_err().to_string(),
            "Undefined variable 'src' at column 2"
        );
        assert_eq!(
            expand("#{src").unwrap_err().to_string(),
            "Unclosed brace at column 2"
        );
    }
}
