/// Wrap `value` in single quotes for textual embedding in SQL.
///
/// Embedded quotes are NOT doubled: `O'Brien` becomes `'O'Brien'`, which
/// terminates the literal early. Values that can contain `'` must go through
/// placeholder binding (`SubstitutionMode::Placeholders`) instead.
#[must_use]
pub fn escape(value: &str) -> String {
    format!("'{value}'")
}

/// Replace every occurrence of each bound value's literal text in `sql` with
/// its escaped form, one binding after another.
///
/// Substitution is by value, not by placeholder: a binding whose text does not
/// appear in `sql` changes nothing, and an empty literal is never searched for.
#[must_use]
pub fn substitute<'a, I>(sql: &str, literals: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = sql.to_string();
    for literal in literals {
        if literal.is_empty() {
            continue;
        }
        out = out.replace(literal, &escape(literal));
    }
    out
}
