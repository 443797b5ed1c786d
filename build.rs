use shadow_rs::ShadowBuilder;

fn main() {
    // Git and toolchain metadata for `firebase-notify --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
