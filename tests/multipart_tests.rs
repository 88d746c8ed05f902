use assay::multipart::DEFAULT_BOUNDARY;
use assay::{multipart, Multipart, MultipartError};

#[test]
fn test_single_field_body() {
    let form = multipart([("name", "Alice")]).unwrap();
    let expected = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nAlice\r\n--{b}--\r\n",
        b = DEFAULT_BOUNDARY
    );
    assert_eq!(String::from_utf8(form.body).unwrap(), expected);
    assert_eq!(
        form.content_type,
        format!("multipart/form-data; boundary={DEFAULT_BOUNDARY}")
    );
}

#[test]
fn test_empty_form() {
    let form = Multipart::new().finish().unwrap();
    assert_eq!(form.body, format!("--{DEFAULT_BOUNDARY}--\r\n").into_bytes());
}

#[test]
fn test_file_part_headers() {
    let form = Multipart::with_boundary("xyz")
        .unwrap()
        .field("title", "report")
        .file("upload", "data.csv", "text/csv", "a,b\n1,2\n")
        .finish()
        .unwrap();

    let body = String::from_utf8(form.body).unwrap();
    assert_eq!(
        body,
        concat!(
            "--xyz\r\n",
            "Content-Disposition: form-data; name=\"title\"\r\n",
            "\r\n",
            "report\r\n",
            "--xyz\r\n",
            "Content-Disposition: form-data; name=\"upload\"; filename=\"data.csv\"\r\n",
            "Content-Type: text/csv\r\n",
            "\r\n",
            "a,b\n1,2\n\r\n",
            "--xyz--\r\n",
        )
    );
}

#[test]
fn test_parts_split_back_in_order() {
    let form = multipart([("a", "1"), ("b", "2"), ("c", "3")]).unwrap();
    let body = String::from_utf8(form.body).unwrap();
    let delimiter = format!("--{DEFAULT_BOUNDARY}");

    let parts: Vec<&str> = body
        .split(delimiter.as_str())
        .filter(|part| !part.is_empty() && *part != "--\r\n")
        .collect();
    assert_eq!(parts.len(), 3);
    for (part, (name, value)) in parts.iter().zip([("a", "1"), ("b", "2"), ("c", "3")]) {
        assert!(part.contains(&format!("name=\"{name}\"")));
        assert!(part.ends_with(&format!("\r\n\r\n{value}\r\n")));
    }
}

#[test]
fn test_names_are_escaped() {
    let form = multipart([(r#"we"ird\name"#, "v")]).unwrap();
    let body = String::from_utf8(form.body).unwrap();
    assert!(body.contains(r#"name="we\"ird\\name""#));
}

#[test]
fn test_boundary_with_space_is_quoted() {
    let form = Multipart::with_boundary("my boundary").unwrap().finish().unwrap();
    assert_eq!(form.content_type, "multipart/form-data; boundary=\"my boundary\"");
}

#[test]
fn test_invalid_boundary_rejected() {
    let err = Multipart::with_boundary("bad;boundary").unwrap_err();
    assert!(matches!(err, MultipartError::InvalidBoundary { .. }));
    assert!(Multipart::with_boundary("").is_err());
}

#[test]
fn test_boundary_in_content_rejected() {
    let err = Multipart::with_boundary("sep")
        .unwrap()
        .field("evil", "line\r\n--sep\r\n")
        .finish()
        .unwrap_err();
    assert!(matches!(err, MultipartError::BoundaryInContent { ref name } if name == "evil"));
}

#[test]
fn test_binary_file_content_kept() {
    let bytes = vec![0u8, 159, 146, 150];
    let form = Multipart::new()
        .file("bin", "x.bin", "application/octet-stream", bytes.clone())
        .finish()
        .unwrap();
    assert!(form.body.windows(bytes.len()).any(|w| w == bytes.as_slice()));
}
