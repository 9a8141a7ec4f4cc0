//! 시작 단계 터미널 출력
//!
//! 서비스 레지스트리 초기화와 서버 기동 정보를 박스 형태로 보여줍니다.
//! 로그 레벨과 무관하게 항상 표시되어야 하므로 `println!`을 씁니다.

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);
    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 서버 기동 배너
pub fn print_server_banner(host: &str, port: u16, env: &str, frontend_url: &str) {
    print_boxed_title("🏃 RUNNING TRACKER BACKEND");
    println!("   📡 Listening: http://{}:{}", host, port);
    println!("   💻 Local: http://localhost:{}", port);
    println!("   🌍 Environment: {}", env);
    println!("   🔗 Frontend: {}", frontend_url);
    println!();
}
