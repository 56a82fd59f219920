/// Loose skill match: either string contains the other. Both inputs are
/// expected lower-cased by the caller.
///
/// An empty string overlaps everything; blank list entries are not filtered.
pub fn skills_overlap(required: &str, candidate: &str) -> bool {
    candidate.contains(required) || required.contains(candidate)
}

pub fn normalize_skills<'a, I>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    skills.into_iter().map(|s| s.to_lowercase()).collect()
}

/// True when any of `candidate_skills` overlaps `required`.
pub fn has_skill(required: &str, candidate_skills: &[String]) -> bool {
    candidate_skills
        .iter()
        .any(|candidate| skills_overlap(required, candidate))
}
