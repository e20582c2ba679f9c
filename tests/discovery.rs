use std::sync::Arc;

use eventcrawler::{CrawlConfig, CrawlError, Crawler, Lexicon, Scraper};
use mockito::{Mock, Server, ServerGuard};
use url::Url;

fn event_page(title: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title></head><body>
           <h1>{title}</h1>
           <div class="details">
             <p>When: Saturday, May 3</p>
             <p>Where: Main hall</p>
             <p>(415) 555-1234</p>
           </div>
           <a href="/events/">All events</a>
           </body></html>"#
    )
}

async fn html(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await
}

async fn crawl(server: &ServerGuard, path: &str) -> eventcrawler::Result<Vec<eventcrawler::Match>> {
    let lexicon = Lexicon::default();
    let crawler = Crawler::new(Arc::new(Scraper::new()?), &lexicon, CrawlConfig::default());
    let seed = Url::parse(&format!("{}{}", server.url(), path)).unwrap();
    crawler.crawl(&seed).await
}

#[tokio::test]
async fn discovers_sibling_event_pages_over_http() {
    let mut server = Server::new_async().await;
    let _seed = html(&mut server, "/events/2024/gala", &event_page("Gala")).await;
    let _jazz = html(&mut server, "/events/2024/jazz", &event_page("Jazz")).await;
    let _film = html(&mut server, "/events/2024/film", &event_page("Film")).await;
    let _listing = html(
        &mut server,
        "/events/",
        r#"<html><body><h1>Calendar</h1><ul>
             <li><a href="2024/jazz">Jazz</a></li>
             <li><a href="2024/film#tickets">Film</a></li>
             <li><a href="/about">About</a></li>
             <li><a href="mailto:box@example.com">Mail us</a></li>
             <li><a href="http://elsewhere.example.com/events/1">Partner</a></li>
           </ul></body></html>"#,
    )
    .await;
    let about = server
        .mock("GET", "/about")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let matches = crawl(&server, "/events/2024/gala").await.unwrap();

    let urls: Vec<String> = matches.iter().map(|m| m.url.path().to_string()).collect();
    assert_eq!(urls, ["/events/2024/film", "/events/2024/jazz"]);
    assert!(matches.iter().all(|m| m.score == 0.0));
    about.assert_async().await;
}

#[tokio::test]
async fn server_error_fails_the_run() {
    let mut server = Server::new_async().await;
    let _seed = html(&mut server, "/events/2024/gala", &event_page("Gala")).await;
    let _listing = html(&mut server, "/events/", r#"<html><body><a href="/broken">x</a></body></html>"#).await;
    let _broken = server
        .mock("GET", "/broken")
        .with_status(503)
        .create_async()
        .await;

    let result = crawl(&server, "/events/2024/gala").await;
    assert!(matches!(result, Err(CrawlError::Status { status: 503, .. })));
}
