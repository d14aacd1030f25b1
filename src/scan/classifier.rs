//! Availability heuristic over a profile page response.
//!
//! The markers below were picked from observed profile markup; the platform
//! publishes no contract for them, so treat the verdict as a best guess that
//! breaks whenever the page layout changes.

/// How much of the body is searched for a bare `404`
const STATUS_PREFIX_CHARS: usize = 1000;

/// Decide whether `username` looks available given the page response
pub fn classify(username: &str, status: u16, body: &str) -> bool {
    if status != 200 {
        return false;
    }

    has_profile_marker(username, body) && !is_not_found_page(body)
}

/// The page embeds profile data for this exact username
pub fn has_profile_marker(username: &str, body: &str) -> bool {
    if body.contains(&format!("\"uniqueId\":\"{}\"", username)) {
        return true;
    }

    body.contains(&format!("@{}", username)) && body.contains("\"id\":\"") && body.contains("\"stats\"")
}

/// The page is an error or not-found page
pub fn is_not_found_page(body: &str) -> bool {
    if body.to_lowercase().contains("not found") || body.contains("<title>Not Found</title>") {
        return true;
    }

    let prefix_end = body
        .char_indices()
        .nth(STATUS_PREFIX_CHARS)
        .map_or(body.len(), |(idx, _)| idx);
    body[..prefix_end].contains("404")
}
