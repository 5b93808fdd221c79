fn main() {
    // Set linker flags for macOS to help dylib resolution
    #[cfg(target_os = "macos")]
    {
        println!("cargo:rustc-link-arg=-Wl,-rpath,@executable_path/../Frameworks");
    }

    // The library alone needs no codegen; only the Tauri host does
    #[cfg(feature = "app")]
    tauri_build::build();
}
