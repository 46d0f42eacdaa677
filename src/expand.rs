use crate::page::PageHandle;

/// Activate every "read more" style control matching `patterns`, in order.
///
/// Runs once, before any text is read. There is no settle delay, so content that
/// the host renders asynchronously after activation may still be missing.
/// Elements that refuse activation are skipped and counted as zero.
pub fn expand(page: &mut dyn PageHandle, patterns: &[&str]) -> usize {
    let mut activated = 0;

    for pattern in patterns {
        for result in page.activate(pattern) {
            match result {
                Ok(()) => activated += 1,
                Err(e) => tracing::debug!(pattern, error = %e, "expansion control did not activate"),
            }
        }
    }

    if activated > 0 {
        tracing::debug!(activated, "expanded truncated content");
    }
    activated
}
