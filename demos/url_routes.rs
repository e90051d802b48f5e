//! Routing request URLs to handlers by longest path prefix
use radix_map::RadixMap;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = RadixMap::<String, &str>::new();
    routes.insert("/".to_string(), "index");
    routes.insert("/blog".to_string(), "blog index");
    routes.insert("/blog/archive".to_string(), "blog archive");
    routes.insert("/static/".to_string(), "static files");
    routes.insert("/api/v1/".to_string(), "api v1");
    routes.insert("/api/v2/".to_string(), "api v2");

    let requests = [
        "https://example.com/",
        "https://example.com/blog/first-post",
        "https://example.com/blog/archive/2020",
        "https://example.com/static/css/site.css",
        "https://example.com/api/v2/users?id=7",
        "https://example.com/api/v3/users",
    ];

    println!("Routing requests:");
    for request in requests.iter() {
        let url = Url::parse(request)?;
        let hit = routes.longest_match(&url.path().to_string());
        match hit.key_value() {
            Some((prefix, handler)) => println!("  {} → {} (via {})", url, handler, prefix),
            None => println!("  {} → no route", url),
        }
    }

    println!("\nRoutes under /api:");
    for (prefix, handler) in routes.prefix_match(&"/api".to_string()) {
        println!("  {} → {}", prefix, handler);
    }

    Ok(())
}
