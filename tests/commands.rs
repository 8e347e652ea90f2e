#[cfg(test)]
mod tests {
    use doc_intake::export::ExportFormat;
    use doc_intake::intake::preview::PreviewEvent;
    use doc_intake::session::overlay::OverlayKind;
    use doc_intake::session::viewer::ViewerContent;
    use doc_intake::session::Session;
    use doc_intake::*;
    use tempfile::TempDir;

    const MIB: usize = 1024 * 1024;
    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    /// Helper to build a session whose exports land in a temporary directory
    fn create_test_session() -> (Session, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = IntakeConfig {
            export_dir: temp_dir.path().to_owned(),
            ..IntakeConfig::default()
        };
        (Session::new(&config), temp_dir)
    }

    /// Mixed batch: one valid image, one bad type, one oversized document
    #[tokio::test]
    async fn test_mixed_batch() {
        let (mut session, _temp_dir) = create_test_session();

        let ids = session
            .upload(vec![
                RawFile::from_bytes("a.png", "image/png", vec![0; MIB]),
                RawFile::from_bytes("b.exe", "application/x-msdownload", vec![0; MIB]),
                RawFile::from_bytes("c.pdf", "application/pdf", vec![0; 11 * MIB]),
            ])
            .await
            .expect("Failed to upload batch");

        assert_eq!(ids.len(), 1);
        assert_eq!(session.files()[0].name, "a.png");
        assert_eq!(session.error(), Some("File size exceeds 10MB limit."));
    }

    /// All-failing batch emits nothing and keeps only the last message
    #[tokio::test]
    async fn test_all_rejected_batch() {
        let (mut session, _temp_dir) = create_test_session();

        let ids = session
            .upload(vec![
                RawFile::from_bytes("big.png", "image/png", vec![0; 10 * MIB + 1]),
                RawFile::from_bytes("notes.rtf", "application/rtf", vec![0; 10]),
            ])
            .await
            .expect("Failed to upload batch");

        assert!(ids.is_empty());
        assert!(session.files().is_empty());
        assert!(session.languages().is_empty());
        assert!(session.extracted().is_none());
        assert_eq!(
            session.error(),
            Some("File type application/rtf is not supported. Please upload JPG, PNG, JPEG, PDF, or DOCX files.")
        );
    }

    /// Exactly 10 MiB is still accepted
    #[tokio::test]
    async fn test_size_boundary() {
        let (mut session, _temp_dir) = create_test_session();
        let ids = session
            .upload(vec![RawFile::from_bytes("edge.pdf", "application/pdf", vec![0; 10 * MIB])])
            .await
            .expect("Failed to upload batch");

        assert_eq!(ids.len(), 1);
        assert!(session.error().is_none());
    }

    /// Image preview lands on the already-emitted record without a new batch
    #[tokio::test]
    async fn test_preview_attaches_after_emission() {
        let (mut session, _temp_dir) = create_test_session();

        let ids = session
            .upload(vec![RawFile::from_bytes("x.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])])
            .await
            .expect("Failed to upload batch");
        let id = ids[0].clone();

        assert!(session.file(&id).unwrap().preview.is_none());

        session.wait_for_previews().await;

        let file = session.file(&id).expect("file still present");
        assert_eq!(file.preview.as_deref(), Some("data:image/jpeg;base64,/9j/4A=="));
        assert_eq!(session.files().len(), 1);
    }

    /// Previews can be applied by hand, as a UI event loop would
    #[tokio::test]
    async fn test_manual_preview_event() {
        let (mut session, _temp_dir) = create_test_session();
        let ids = session
            .upload(vec![RawFile::from_bytes("scan.pdf", "application/pdf", b"%PDF".to_vec())])
            .await
            .expect("Failed to upload batch");

        assert_eq!(session.pending_previews(), 0);
        assert!(session.apply_preview(PreviewEvent::Ready {
            id: ids[0].clone(),
            data_uri: "data:application/pdf;base64,JVBERg==".into(),
        }));
        assert!(session.file(&ids[0]).unwrap().preview.is_some());
    }

    /// Files read from disk are sniffed and previewed from their path
    #[tokio::test]
    async fn test_upload_from_disk() {
        let (mut session, temp_dir) = create_test_session();
        let image_path = temp_dir.path().join("photo.png");
        let doc_path = temp_dir.path().join("contract.docx");
        tokio::fs::write(&image_path, PNG_HEADER).await.unwrap();
        tokio::fs::write(&doc_path, b"not really a zip").await.unwrap();

        let batch = vec![
            RawFile::from_path(&image_path).await.expect("Failed to read image"),
            RawFile::from_path(&doc_path).await.expect("Failed to read document"),
        ];
        assert_eq!(batch[0].media_type, "image/png");
        assert_eq!(batch[1].media_type, DOCX_MIME);

        let ids = session.upload(batch).await.expect("Failed to upload batch");
        session.wait_for_previews().await;

        assert_eq!(ids.len(), 2);
        assert!(session.file(&ids[0]).unwrap().preview.is_some());
        assert!(session.file(&ids[1]).unwrap().preview.is_none());
    }

    /// Viewer follows selection and overlay switches
    #[tokio::test]
    async fn test_viewer_for_selection() {
        let (mut session, _temp_dir) = create_test_session();
        let ids = session
            .upload(vec![
                RawFile::from_bytes("x.png", "image/png", PNG_HEADER.to_vec()),
                RawFile::from_bytes("y.pdf", "application/pdf", vec![0; MIB]),
            ])
            .await
            .expect("Failed to upload batch");
        session.wait_for_previews().await;

        session.toggle_overlay(OverlayKind::Text);
        session.select(&ids[0]).expect("Failed to select image");
        match session.viewer() {
            ViewerContent::Image { preview, overlays, .. } => {
                assert!(preview.is_some());
                assert_eq!(overlays, vec![OverlayKind::Text]);
            }
            other => panic!("unexpected viewer content: {:?}", other),
        }

        session.select(&ids[1]).expect("Failed to select document");
        match session.viewer() {
            ViewerContent::Document { size_label, overlay_badges, .. } => {
                assert_eq!(size_label, "1.00 MB");
                assert_eq!(overlay_badges, vec!["Text overlay active".to_string()]);
            }
            other => panic!("unexpected viewer content: {:?}", other),
        }
    }

    /// Every export format is written under its fixed name
    #[tokio::test]
    async fn test_exports() {
        let (mut session, temp_dir) = create_test_session();
        session
            .upload(vec![RawFile::from_bytes("a.pdf", "application/pdf", b"%PDF".to_vec())])
            .await
            .expect("Failed to upload batch");

        for format in ExportFormat::ALL {
            let path = session
                .export_to(format, temp_dir.path())
                .await
                .expect("Failed to export")
                .expect("nothing extracted");
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), format.file_name());
        }

        let json = tokio::fs::read_to_string(temp_dir.path().join("extracted-data.json")).await.unwrap();
        let parsed: StructuredDocument = serde_json::from_str(&json).expect("export is valid JSON");
        assert_eq!(parsed.sections.len(), 4);
    }

    /// Summary reflects the extracted fixture
    #[tokio::test]
    async fn test_summary_after_upload() {
        let (mut session, _temp_dir) = create_test_session();
        session
            .upload(vec![RawFile::from_bytes("a.pdf", "application/pdf", b"%PDF".to_vec())])
            .await
            .expect("Failed to upload batch");

        assert!(session.summary().starts_with("This document contains 4 sections."));
        let labels: Vec<_> = session.languages().iter().map(|l| l.confidence_label()).collect();
        assert_eq!(labels, vec!["95.2%", "3.1%", "1.7%"]);
    }
}
