//! User-facing message texts (Korean, HTML formatted).

use crate::chat::escape_html;

/// Reply to `/start` and `/help`.
pub const USAGE: &str = "이모티콘을 스티커로 변환하시려면 /create [이모티콘URL] 을 입력해주세요. \
웹 버전 이모티콘 스토어 URL만 가능합니다.";

pub const INVALID_URL: &str = "유효한 이모티콘 URL이 아닙니다.";

pub const LOADING: &str = "이모티콘 정보를 불러오는 중입니다.";

/// Base of the deep link that installs a sticker set.
pub const ADD_STICKERS_URL: &str = "https://t.me/addstickers";

pub fn announce(title: &str) -> String {
    format!("<b>{}</b> 이모티콘을 다운로드 합니다.", escape_html(title))
}

pub fn downloading(done: usize, total: usize) -> String {
    format!("다운로드 중... <b>({}/{})</b>", done, total)
}

pub fn upload_total(total: usize) -> String {
    format!("총 <b>{}</b> 개의 이모티콘을 텔레그램 서버로 업로드합니다.", total)
}

pub fn uploading(done: usize, total: usize) -> String {
    format!("업로드 중... <b>({}/{})</b>", done, total)
}

pub fn set_link(set_name: &str) -> String {
    format!("{}/{}", ADD_STICKERS_URL, set_name)
}

pub fn completed(title: &str, set_name: &str, failed_uploads: usize) -> String {
    let mut text = format!(
        "<b>{}</b> 스티커 생성이 완료되었습니다!\n{}",
        escape_html(title),
        set_link(set_name)
    );
    if failed_uploads > 0 {
        text.push_str(&format!(
            "\n업로드에 실패한 이모티콘: <b>{}</b>개",
            failed_uploads
        ));
    }
    text
}
