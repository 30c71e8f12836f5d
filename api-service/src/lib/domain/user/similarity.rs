//! Near-duplicate username detection.
//!
//! Two usernames are similar when their normalised forms (lower-cased, with
//! every non-alphanumeric character removed) are equal or one edit apart.

/// Largest edit distance between normalised usernames still considered similar.
const MAX_DISTANCE: usize = 1;

pub fn normalize(username: &str) -> String {
    username
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn is_similar(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    a == b || levenshtein(&a, &b) <= MAX_DISTANCE
}

/// Stored usernames similar to `candidate`, in input order.
pub fn similar_to(candidate: &str, usernames: &[String]) -> Vec<String> {
    usernames
        .iter()
        .filter(|username| is_similar(candidate, username))
        .cloned()
        .collect()
}

/// Partition usernames into groups of mutually reachable near-duplicates.
///
/// Only groups with at least two members are returned. Groups are ordered by
/// their first member's position in `usernames`, and members keep input order.
pub fn group_similar(usernames: &[String]) -> Vec<Vec<String>> {
    let normalized: Vec<String> = usernames.iter().map(|u| normalize(u)).collect();
    let mut parent: Vec<usize> = (0..usernames.len()).collect();

    for i in 0..normalized.len() {
        for j in (i + 1)..normalized.len() {
            if normalized[i] == normalized[j]
                || levenshtein(&normalized[i], &normalized[j]) <= MAX_DISTANCE
            {
                union(&mut parent, i, j);
            }
        }
    }

    let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
    for (index, username) in usernames.iter().enumerate() {
        let root = find(&mut parent, index);
        match groups.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(username.clone()),
            None => groups.push((root, vec![username.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(_, members)| members)
        .filter(|members| members.len() > 1)
        .collect()
}

fn find(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let root_a = find(parent, a);
    let root_b = find(parent, b);
    if root_a != root_b {
        // Keep the earlier index as root so group order follows input order.
        let (low, high) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        parent[high] = low;
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > MAX_DISTANCE {
        return a.len().abs_diff(b.len());
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
