use iocraft::prelude::*;
use xmedia::{MediaProcessingInfo, MediaUploadResponse, ProcessingState, RateLimit};

#[derive(Default, Props)]
pub struct UploadSummaryProps {
    pub title: String,
    pub response: Option<MediaUploadResponse>,
}

#[component]
pub fn UploadSummary(props: &UploadSummaryProps) -> impl Into<AnyElement<'static>> {
    let response = props.response.as_ref().unwrap();
    element! {
        View(flex_direction: FlexDirection::Column) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: "┌ ")
                View(background_color: Color::Blue) {
                    Text(content: &props.title, color: Color::White)
                }
            }
            Field(label: "Media ID", value: response.media_id.to_string())
            Field(label: "Media ID String", value: response.media_id_string.clone())
            Field(label: "Media Key", value: response.media_key.clone())
            Field(label: "Size", value: format!("{} bytes", response.size))
            Field(
                label: "Expires after",
                value: humantime::format_duration(response.expires_after).to_string()
            )
            #(response.processing_info.clone().map(|info| element! {
                Processing(info: info)
            }))
            Text(content: "│")
            Text(content: format!("└ {}", rate_limit_line(response.rate_limit.as_ref())))
        }
    }
}

fn rate_limit_line(rate_limit: Option<&RateLimit>) -> String {
    match rate_limit {
        Some(rate_limit) => format!(
            "Rate limit: {}/{} remaining, resets at {}",
            rate_limit.remaining,
            rate_limit.limit,
            humantime::format_rfc3339_seconds(rate_limit.reset)
        ),
        None => "Rate limit: not reported".to_string(),
    }
}

#[derive(Default, Props)]
struct FieldProps {
    label: &'static str,
    value: String,
}

#[component]
fn Field(props: &FieldProps) -> impl Into<AnyElement<'static>> {
    element! {
        View(flex_direction: FlexDirection::Row) {
            Text(content: format!("│ {:<16}", props.label))
            Text(weight: Weight::Bold, content: &props.value)
        }
    }
}

#[derive(Default, Props)]
struct ProcessingProps {
    info: Option<MediaProcessingInfo>,
}

#[component]
fn Processing(props: &ProcessingProps) -> impl Into<AnyElement<'static>> {
    let info = props.info.as_ref().unwrap();
    let state = info.processing_state();
    let mut detail = state.to_string();
    if let Some(percent) = info.progress_percent {
        detail.push_str(&format!(" ({percent}%)"));
    }
    if let Some(check_after) = info.check_after.filter(|_| !state.is_terminal()) {
        detail.push_str(&format!(
            ", check again in {}",
            humantime::format_duration(check_after)
        ));
    }

    element! {
        View(flex_direction: FlexDirection::Column) {
            Text(content: "│")
            View(flex_direction: FlexDirection::Row) {
                Text(content: "│ ")
                StatusIcon(state: Some(state))
                Text(weight: Weight::Bold, content: " Processing: ")
                Text(content: detail)
            }
            #(info.error.as_ref().map(|error| element! {
                Text(
                    color: Color::Red,
                    content: format!("│   {} ({}): {}", error.name, error.code, error.message)
                )
            }))
        }
    }
}

#[derive(Default, Props)]
struct StatusIconProps {
    state: Option<ProcessingState>,
}

#[component]
fn StatusIcon(props: &StatusIconProps) -> impl Into<AnyElement<'static>> {
    let (color, icon) = match props.state {
        Some(ProcessingState::Pending) => (Color::Reset, "◇"),
        Some(ProcessingState::InProgress) => (Color::Cyan, "◐"),
        Some(ProcessingState::Succeeded) => (Color::Green, "◆"),
        Some(ProcessingState::Failed) => (Color::Red, "▲"),
        _ => (Color::Yellow, "❓"),
    };
    element! {
        Text(color: color, content: icon)
    }
}

#[derive(Default, Props)]
pub struct ErrorMessageProps {
    pub message: String,
}

#[component]
pub fn ErrorMessage(props: &ErrorMessageProps) -> impl Into<AnyElement<'static>> {
    element! {
        View(flex_direction: FlexDirection::Row) {
            Text(color: Color::Red, weight: Weight::Bold, content: "✗ ")
            Text(color: Color::Red, content: &props.message)
        }
    }
}
