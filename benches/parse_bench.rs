// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kirje::{Request, Response};

const HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>
    <div id="content">
        <a href="/page1">Link 1</a>
        <a href="/page2">Link 2</a>
        <form action="/submit" method="post">
            <input type="text" name="query">
            <input type="submit">
        </form>
    </div>
</body>
</html>"#;

fn response_parsing_benchmark(c: &mut Criterion) {
    let html_capture = format!(
        "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\nConnection: close\r\n\r\n{}",
        HTML
    );
    let plain_capture = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n{}",
        HTML
    );

    c.bench_function("parse_html_response", |b| {
        b.iter(|| black_box(Response::parse(black_box(&html_capture))))
    });

    c.bench_function("parse_plain_response", |b| {
        b.iter(|| black_box(Response::parse(black_box(&plain_capture))))
    });
}

fn url_building_benchmark(c: &mut Criterion) {
    let mut request = Request::new();
    request
        .set_url("https://www.example.com/search?lang=en")
        .expect("valid url")
        .add_query_parameter("q", "hello world")
        .add_query_parameter("tags", vec!["a", "b", "c"]);

    c.bench_function("request_url", |b| b.iter(|| black_box(request.request_url())));
}

criterion_group!(benches, response_parsing_benchmark, url_building_benchmark);
criterion_main!(benches);
