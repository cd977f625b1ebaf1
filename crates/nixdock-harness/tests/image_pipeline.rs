//! End-to-end pipeline tests against real `nix-build` and `docker`.
//!
//! Covered scenarios:
//! - `unzipped_image_has_exactly_one_layer`: single-content-layer build
//!   produces one layer directory plus a manifest
//! - `rebuilding_identical_inputs_is_idempotent`: same name/tag twice gives
//!   the same artifact shape
//! - `invalid_image_name_fails_the_build`: builder rejects a bad name
//!   instead of producing a malformed artifact
//! - `zipped_image_runs_and_prints_hello`: tarball load, container run,
//!   exact stdout comparison, image unloaded afterwards
//!
//! Each test skips itself when the external tool it drives is not on
//! `PATH`, so the suite stays green on machines without Nix or Docker.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::print_stderr)]

use nixdock_common::constants::{DEFAULT_OUT_LINK, IMAGE_SUBDIR, NIX_BUILD_BIN, TARBALL_OUT_LINK};
use nixdock_common::types::ImageRef;
use nixdock_harness::{build, docker, expr, validate};

fn nix_available() -> bool {
    which::which(NIX_BUILD_BIN).is_ok()
}

fn docker_available() -> bool {
    docker::DockerEngine::new().is_ok()
}

#[test]
fn unzipped_image_has_exactly_one_layer() {
    if !nix_available() {
        eprintln!("skipping: nix-build not found");
        return;
    }
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let image = ImageRef::new("some_image_name", "some_tag");

    let out_link = build::nix_build(
        &expr::unzipped_image_expr(&image),
        dir.path(),
        DEFAULT_OUT_LINK,
    )
    .expect("build failed");

    let report = validate::validate_image(&out_link.join(IMAGE_SUBDIR)).expect("validation failed");
    assert_eq!(report.layer_count(), 1, "expected a single content layer");
}

#[test]
fn rebuilding_identical_inputs_is_idempotent() {
    if !nix_available() {
        eprintln!("skipping: nix-build not found");
        return;
    }
    let image = ImageRef::new("some_image_name", "some_tag");
    let expression = expr::unzipped_image_expr(&image);

    let first_dir = tempfile::tempdir().expect("failed to create tempdir");
    let second_dir = tempfile::tempdir().expect("failed to create tempdir");

    let first = build::nix_build(&expression, first_dir.path(), DEFAULT_OUT_LINK)
        .and_then(|link| validate::validate_image(&link.join(IMAGE_SUBDIR)))
        .expect("first build failed");
    let second = build::nix_build(&expression, second_dir.path(), DEFAULT_OUT_LINK)
        .and_then(|link| validate::validate_image(&link.join(IMAGE_SUBDIR)))
        .expect("second build failed");

    assert_eq!(first.layer_count(), second.layer_count());
    assert_eq!(first.repo_tags, second.repo_tags);
}

#[test]
fn invalid_image_name_fails_the_build() {
    if !nix_available() {
        eprintln!("skipping: nix-build not found");
        return;
    }
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    // Spaces are invalid in an image name; the builder must reject the
    // expression rather than emit a malformed artifact.
    let image = ImageRef::new("some image name", "some_tag");

    let result = build::nix_build(&expr::unzipped_image_expr(&image), dir.path(), DEFAULT_OUT_LINK);
    assert!(result.is_err(), "builder accepted an invalid image name");
}

#[test]
fn zipped_image_runs_and_prints_hello() {
    if !nix_available() {
        eprintln!("skipping: nix-build not found");
        return;
    }
    if !docker_available() {
        eprintln!("skipping: docker not found");
        return;
    }
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let image = ImageRef::new("bash_image", "bash_tag");

    let tarball = build::nix_build(&expr::tar_image_expr(&image), dir.path(), TARBALL_OUT_LINK)
        .expect("tarball build failed");
    validate::validate_tarball(&tarball).expect("tarball validation failed");

    let engine = docker::DockerEngine::new().expect("docker lookup failed");
    let loaded = engine.load(&image, &tarball).expect("image load failed");

    let output = engine
        .run_capture(loaded.image(), &["bash", "-c", "cat /data/hello.txt"])
        .expect("container run failed");
    assert_eq!(output, "hello\n");
    // `loaded` drops here and unloads the image even if the assertion fails.
}
