use webworker::http::mime::ContentType;

#[test]
fn test_documented_mapping() {
    let cases = [
        ("a.jpg", "image/jpeg"),
        ("a.jpeg", "image/jpeg"),
        ("a.gif", "image/gif"),
        ("a.png", "image/png"),
        ("a.ico", "image/x-icon"),
        ("a.html", "text/html"),
    ];

    for (path, mime) in cases {
        assert_eq!(ContentType::from_path(path).mime_type(), mime, "{}", path);
    }
}

#[test]
fn test_mapping_ignores_case() {
    assert_eq!(ContentType::from_path("Photos/Holiday.JPEG"), ContentType::Jpeg);
    assert_eq!(ContentType::from_path("IMG/Anim.GiF"), ContentType::Gif);
    assert_eq!(ContentType::from_path("Logo.Png"), ContentType::Png);
    assert_eq!(ContentType::from_path("FAVICON.ICO"), ContentType::Icon);
    assert_eq!(ContentType::from_path("Docs/INDEX.HTML"), ContentType::Html);
}

#[test]
fn test_unknown_types() {
    for path in ["", "readme", "notes.txt", "style.css", "page.htm", "png-notes"] {
        let kind = ContentType::from_path(path);
        assert_eq!(kind, ContentType::Unknown, "{}", path);
        assert_eq!(kind.mime_type(), "");
    }
}

#[test]
fn test_several_extensions_resolve_in_listed_order() {
    assert_eq!(ContentType::from_path("photo.jpg.html"), ContentType::Jpeg);
    assert_eq!(ContentType::from_path("PHOTO.JPG.HTML"), ContentType::Jpeg);
    assert_eq!(ContentType::from_path("archive.png.gz"), ContentType::Png);
    assert_eq!(ContentType::from_path("favicon.ico.html"), ContentType::Icon);
}

#[test]
fn test_directory_names_do_not_count() {
    assert_eq!(ContentType::from_path("site.html/raw"), ContentType::Unknown);
    assert_eq!(ContentType::from_path("images.png/cat.gif"), ContentType::Gif);
}
