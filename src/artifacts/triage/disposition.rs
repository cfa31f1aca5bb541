/// What to do with one unmanaged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Track the file so the next commit includes it
    Add,
    /// Ignore this exact path
    IgnorePath,
    /// Ignore every file with the same extension
    IgnoreExtension,
    /// Ignore the folder made of the first `n` path segments
    IgnoreAncestor(usize),
    Delete,
    /// Leave the file alone until the next push
    Pass,
}

/// A parsed operator answer to a triage prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Choose(Disposition),
    Help,
    Invalid(String),
}

pub const PROMPT_CHOICES: &str = "[aixNdph]";

pub const LEGEND: &str = "    a - add to repo
    i - add file to ignore list
    x - add file's extension to the ignore list
    N - (a number) add the folder made of the first N parts of the path to the ignore list
    d - delete the file (after confirm)
    p - pass (do not add to repo, do nothing with file)
    ? or h - print this help and prompt again";

impl Response {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        match input {
            "a" => Response::Choose(Disposition::Add),
            "i" => Response::Choose(Disposition::IgnorePath),
            "x" => Response::Choose(Disposition::IgnoreExtension),
            "d" => Response::Choose(Disposition::Delete),
            "p" => Response::Choose(Disposition::Pass),
            "?" | "h" => Response::Help,
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                match digits.parse::<usize>() {
                    Ok(depth) if depth > 0 => Response::Choose(Disposition::IgnoreAncestor(depth)),
                    // absurdly long digit strings still mean "as deep as possible"
                    Err(_) => Response::Choose(Disposition::IgnoreAncestor(usize::MAX)),
                    Ok(_) => Response::Invalid(input.to_string()),
                }
            }
            other => Response::Invalid(other.to_string()),
        }
    }
}
