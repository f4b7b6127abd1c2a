// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only). Page retrieval is a collaborator of
// the extraction core: a failed fetch skips one hero and never aborts
// the batch.

use std::{io::{Read, Write}, net::TcpStream, time::Duration};
use crate::config::consts::{HOST, WIKI_PREFIX};

/// Fetch `/wiki/<page>` from the configured host and return the body.
pub fn http_get(page: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut s = TcpStream::connect((HOST, 80))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    let full = format!("{}{}", WIKI_PREFIX, page);
    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: ow_scrape/0.3\r\nConnection: close\r\n\r\n",
        full, HOST
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(format!("HTTP error: {} {}{}", status, HOST, full).into());
    }
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}
