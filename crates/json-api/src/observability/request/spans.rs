//! Route labels for spans and metrics.
//!
//! Numeric path segments are collapsed so `/orders/17` and `/orders/18`
//! share one label.

const ID_PLACEHOLDER: &str = "{id}";

pub(super) fn span_name(method: &str, route: &str) -> String {
    format!("{method} {route}")
}

pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if is_id_segment(segment) {
                ID_PLACEHOLDER
            } else {
                segment
            }
        })
        .collect::<Vec<_>>();

    format!("/{}", segments.join("/"))
}

fn is_id_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}
