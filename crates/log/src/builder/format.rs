//! Format layer creation macros

/// Build a boxed text layer (`pretty` or `compact`) from a [`DisplayConfig`](crate::DisplayConfig)
macro_rules! create_fmt_layer {
    ($format:ident, $display:expr) => {{
        let display = $display;
        let layer = tracing_subscriber::fmt::layer()
            .$format()
            .with_writer(std::io::stderr)
            .with_ansi(display.colors)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source)
            .with_thread_ids(display.thread_ids)
            .with_thread_names(display.thread_names);

        if display.time {
            tracing_subscriber::Layer::boxed(layer)
        } else {
            tracing_subscriber::Layer::boxed(layer.without_time())
        }
    }};
}

/// Build a boxed JSON layer (has additional options)
macro_rules! create_json_layer {
    ($display:expr) => {{
        let display = $display;
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(display.span_list)
            .flatten_event(display.flatten)
            .with_ansi(false)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source)
            .with_thread_ids(display.thread_ids)
            .with_thread_names(display.thread_names);

        if display.time {
            tracing_subscriber::Layer::boxed(layer)
        } else {
            tracing_subscriber::Layer::boxed(layer.without_time())
        }
    }};
}
