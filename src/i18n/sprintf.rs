//! printf-style formatting of translation templates.
//!
//! Supported conversions: `%s`, `%d` / `%i` (integer, truncated), `%f` with an
//! optional `.N` precision, `%%`, and explicit positions such as `%2$s`.
//! A conversion without a matching argument renders as an empty string;
//! anything unrecognised is copied through verbatim.

/// Substitute `args` into `template`.
pub fn sprintf<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let directive = &rest[pos + 1..];

        match parse_directive(directive) {
            Some(Directive::Percent) => {
                out.push('%');
                rest = &directive[1..];
            }
            Some(Directive::Conversion {
                position,
                precision,
                kind,
                len,
            }) => {
                let index = match position {
                    Some(p) => p - 1,
                    None => {
                        next_arg += 1;
                        next_arg - 1
                    }
                };
                if let Some(arg) = args.get(index) {
                    out.push_str(&convert(arg.as_ref(), kind, precision));
                }
                rest = &directive[len..];
            }
            None => {
                out.push('%');
                rest = directive;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Str,
    Int,
    Float,
}

#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Percent,
    Conversion {
        position: Option<usize>,
        precision: Option<usize>,
        kind: Kind,
        /// Bytes consumed after the `%`.
        len: usize,
    },
}

fn parse_directive(directive: &str) -> Option<Directive> {
    let bytes = directive.as_bytes();
    if bytes.first() == Some(&b'%') {
        return Some(Directive::Percent);
    }

    let mut i = 0;
    let mut position = None;

    let digits = count_digits(&bytes[i..]);
    if digits > 0 && bytes.get(digits) == Some(&b'$') {
        position = Some(directive[..digits].parse::<usize>().ok().filter(|p| *p > 0)?);
        i = digits + 1;
    }

    let mut precision = None;
    if bytes.get(i) == Some(&b'.') {
        let digits = count_digits(&bytes[i + 1..]);
        precision = directive[i + 1..i + 1 + digits].parse::<usize>().ok().or(Some(0));
        i += 1 + digits;
    }

    let kind = match bytes.get(i)? {
        b's' => Kind::Str,
        b'd' | b'i' => Kind::Int,
        b'f' => Kind::Float,
        _ => return None,
    };

    Some(Directive::Conversion {
        position,
        precision,
        kind,
        len: i + 1,
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn convert(arg: &str, kind: Kind, precision: Option<usize>) -> String {
    match kind {
        Kind::Str => match precision {
            Some(max) => arg.chars().take(max).collect(),
            None => arg.to_string(),
        },
        Kind::Int => match arg.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => format!("{}", n.trunc() as i64),
            _ => "NaN".to_string(),
        },
        Kind::Float => match arg.trim().parse::<f64>() {
            Ok(n) => match precision {
                Some(p) => format!("{n:.p$}"),
                None => format!("{n}"),
            },
            Err(_) => "NaN".to_string(),
        },
    }
}
