use std::env;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=csrc/ocio_capi.h");
    println!("cargo:rerun-if-changed=csrc/ocio_capi.cpp");
    println!("cargo:rerun-if-env-changed=COLORSPACE_OCIO_PREBUILT_DIR");

    if let Some(prebuilt_dir) = env_path("COLORSPACE_OCIO_PREBUILT_DIR") {
        let include_dir = prebuilt_dir.join("include");
        let lib_dir = pick_lib_dir(&prebuilt_dir);
        if !include_dir.exists() || !lib_dir.exists() {
            panic!(
                "COLORSPACE_OCIO_PREBUILT_DIR is missing include/lib paths: {}",
                prebuilt_dir.display()
            );
        }
        compile_wrapper(&[include_dir]);
        link_ocio(&lib_dir);
        return;
    }

    // pkg-config emits the link flags itself.
    let library = pkg_config::Config::new()
        .atleast_version("2.1")
        .probe("OpenColorIO")
        .unwrap_or_else(|e| {
            panic!(
                "OpenColorIO not found via pkg-config ({e}). \
                 Install OpenColorIO 2.1+ or set COLORSPACE_OCIO_PREBUILT_DIR."
            )
        });
    compile_wrapper(&library.include_paths);
    link_cxx_runtime();
}

fn compile_wrapper(ocio_includes: &[PathBuf]) {
    let mut build = cc::Build::new();
    build
        .cpp(true)
        .file("csrc/ocio_capi.cpp")
        .include("csrc")
        .flag_if_supported("-std=c++17");
    for include in ocio_includes {
        build.include(include);
    }
    build.compile("ocio_capi");
}

fn link_ocio(lib_dir: &Path) {
    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=OpenColorIO");
    link_cxx_runtime();
}

fn link_cxx_runtime() {
    if cfg!(target_os = "linux") {
        println!("cargo:rustc-link-lib=dylib=stdc++");
    } else if cfg!(target_os = "macos") {
        println!("cargo:rustc-link-lib=dylib=c++");
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn pick_lib_dir(root: &Path) -> PathBuf {
    let lib = root.join("lib");
    if lib.exists() {
        return lib;
    }
    let lib64 = root.join("lib64");
    if lib64.exists() {
        return lib64;
    }
    lib
}
