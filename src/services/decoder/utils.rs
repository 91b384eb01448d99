use std::collections::HashSet;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use crate::error::AppError;

/// Header name as shown to the user: trimmed, `column_N` when blank, and
/// suffixed `_1`, `_2`, ... when it repeats an earlier header.
pub fn unique_column_name(name: &str, position: usize, existing_names: &mut HashSet<String>) -> String {
    let trimmed = name.trim();
    let base_name = if trimmed.is_empty() {
        format!("column_{}", position + 1)
    } else {
        trimmed.to_string()
    };

    let mut cleaned = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    cleaned
}

pub fn unique_column_names<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut existing_names = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| unique_column_name(name, idx, &mut existing_names))
        .collect()
}

/// Lowercase identifier-safe form of a file name, used as a dataset id prefix.
pub fn clean_dataset_name(name: &str) -> String {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let cleaned = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase();

    if cleaned.chars().next().map_or(true, |c| !c.is_ascii_alphabetic()) {
        format!("ds_{}", cleaned)
    } else {
        cleaned
    }
}

/// Downloads `url`, refusing bodies over `max_bytes`. A declared
/// `Content-Length` is checked up front; the body is then read chunk by chunk
/// and the download aborts as soon as it passes the limit.
pub async fn load_file_from_url(url: &str, max_bytes: usize) -> Result<Bytes, AppError> {
    let client = Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::HttpError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::HttpError(
            format!("Failed to fetch file. Status: {}", response.status())
        ));
    }

    let declared = response.content_length();
    if declared.map_or(false, |len| len > max_bytes as u64) {
        tracing::warn!("Refusing download of {:?} bytes from signed URL", declared);
        return Err(AppError::FileTooLarge { limit: max_bytes });
    }

    let mut buffer = BytesMut::with_capacity(declared.map_or(0, |len| len as usize));
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| AppError::HttpError(format!("Failed to read response bytes: {}", e)))?
    {
        if buffer.len() + chunk.len() > max_bytes {
            tracing::warn!("Download passed {} bytes, aborting", max_bytes);
            return Err(AppError::FileTooLarge { limit: max_bytes });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
/// Serves one canned HTTP response on a local port and returns its URL.
pub(crate) fn serve_once(head: &'static str, body: Vec<u8>) -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
    });
    format!("http://{}/file.csv", addr)
}
