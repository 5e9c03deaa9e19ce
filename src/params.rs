use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// Fully validated reproduction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprodParams {
    pub n_records: u32,
    pub create_records: bool,
    pub clean_records: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    NRecords,
    CreateRecords,
    CleanRecords,
}

impl ParamKey {
    pub const ALL: [Self; 3] = [Self::NRecords, Self::CreateRecords, Self::CleanRecords];

    pub fn env_key(self) -> &'static str {
        match self {
            Self::NRecords => "N_RECORDS",
            Self::CreateRecords => "CREATE_RECORDS",
            Self::CleanRecords => "CLEAN_RECORDS",
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Self::NRecords => "Insert number of records: ",
            Self::CreateRecords => "Do you want to create records? (yes/no) ",
            Self::CleanRecords => {
                "Do you want to clean records before creating new ones? (yes/no) "
            }
        }
    }
}

/// Keys decoded so far; complementary to the invalid set returned by
/// [`decode_partial`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialParams {
    pub n_records: Option<u32>,
    pub create_records: Option<bool>,
    pub clean_records: Option<bool>,
}

fn parse_count(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Validates each known key against the given name/value map, returning the
/// decoded subset along with the keys that were missing or failed validation.
pub fn decode_partial(env: &HashMap<String, String>) -> (PartialParams, Vec<ParamKey>) {
    let mut partial = PartialParams::default();
    let mut invalid = Vec::new();

    for key in ParamKey::ALL {
        let raw = env.get(key.env_key()).map(String::as_str);
        let decoded = match key {
            ParamKey::NRecords => {
                partial.n_records = raw.and_then(parse_count);
                partial.n_records.is_some()
            }
            ParamKey::CreateRecords => {
                partial.create_records = raw.and_then(parse_yes_no);
                partial.create_records.is_some()
            }
            ParamKey::CleanRecords => {
                partial.clean_records = raw.and_then(parse_yes_no);
                partial.clean_records.is_some()
            }
        };
        if !decoded {
            invalid.push(key);
        }
    }

    (partial, invalid)
}

/// Reads the reproduction parameters from the given name/value map, prompting
/// on `input`/`output` for every key that is missing or fails validation.
/// Rejected interactive input is asked again, without a retry bound.
pub fn read_input_params(
    env: &HashMap<String, String>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<ReprodParams> {
    let (mut partial, invalid) = decode_partial(env);

    for key in invalid {
        loop {
            write!(output, "{}", key.prompt())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("input closed before `{}` was supplied", key.env_key()),
                ));
            }

            let accepted = match key {
                ParamKey::NRecords => {
                    partial.n_records = parse_count(&line);
                    partial.n_records.is_some()
                }
                ParamKey::CreateRecords => {
                    partial.create_records = parse_yes_no(&line);
                    partial.create_records.is_some()
                }
                ParamKey::CleanRecords => {
                    partial.clean_records = parse_yes_no(&line);
                    partial.clean_records.is_some()
                }
            };
            if accepted {
                break;
            }
            writeln!(output, "Invalid value for {}, try again.", key.env_key())?;
        }
    }

    match partial {
        PartialParams {
            n_records: Some(n_records),
            create_records: Some(create_records),
            clean_records: Some(clean_records),
        } => Ok(ReprodParams {
            n_records,
            create_records,
            clean_records,
        }),
        _ => unreachable!("every key was either decoded or prompted for"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decodes_a_fully_valid_environment() {
        let env = env(&[
            ("N_RECORDS", "32766"),
            ("CREATE_RECORDS", "yes"),
            ("CLEAN_RECORDS", "no"),
        ]);
        let (partial, invalid) = decode_partial(&env);

        assert_eq!(partial.n_records, Some(32766));
        assert_eq!(partial.create_records, Some(true));
        assert_eq!(partial.clean_records, Some(false));
        assert!(invalid.is_empty());
    }

    #[test]
    fn missing_and_malformed_keys_are_reported_as_invalid() {
        let env = hashmap! {
            "N_RECORDS".to_string() => "-1".to_string(),
            "CREATE_RECORDS".to_string() => "YES".to_string(),
        };
        let (partial, invalid) = decode_partial(&env);

        assert_eq!(partial, PartialParams::default());
        assert_eq!(
            invalid,
            vec![
                ParamKey::NRecords,
                ParamKey::CreateRecords,
                ParamKey::CleanRecords
            ]
        );
    }

    #[test]
    fn count_rejects_signs_fractions_and_garbage() {
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("+1"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("many"), None);
    }

    #[test]
    fn prompts_only_for_the_missing_keys() {
        let env = env(&[("CREATE_RECORDS", "yes"), ("CLEAN_RECORDS", "yes")]);
        let mut output = Vec::new();
        let params = read_input_params(&env, Cursor::new("128\n"), &mut output).unwrap();

        assert_eq!(
            params,
            ReprodParams {
                n_records: 128,
                create_records: true,
                clean_records: true,
            }
        );
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript, "Insert number of records: ");
    }

    #[test]
    fn rejected_input_is_prompted_again_until_it_parses() {
        let env = env(&[("N_RECORDS", "10"), ("CLEAN_RECORDS", "no")]);
        let mut output = Vec::new();
        let params =
            read_input_params(&env, Cursor::new("maybe\n\nyes\n"), &mut output).unwrap();

        assert!(params.create_records);
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript.matches("Do you want to create records?").count(),
            3
        );
        assert_eq!(
            transcript
                .matches("Invalid value for CREATE_RECORDS")
                .count(),
            2
        );
    }

    #[test]
    fn closed_input_surfaces_an_eof_error() {
        let err = read_input_params(&HashMap::new(), Cursor::new(""), Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
