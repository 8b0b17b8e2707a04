//! 测试用的浏览器会话与获取器

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;

use async_trait::async_trait;
use score_pdf::{AppError, AppResult, Config, SourceFetcher, ViewerSession};

pub const CONSENT: &str = ".css-47sehv";
pub const CONTAINER: &str = "#jmuse-scroller-component";

pub const PAGE_A: &str = "https://s3.ultimate-guitar.com/musescore.scoredata/g/1/score_0.svg";
pub const PAGE_B: &str = "https://s3.ultimate-guitar.com/musescore.scoredata/g/1/score_1.svg";
pub const PAGE_C: &str = "https://musescore.com/static/musescore/scoredata/g/1/score_2.svg";
pub const AD: &str = "https://ads.example.com/banner.png";
pub const TRACKING: &str = "https://tracker.example.com/pixel.gif";

/// 快速轮询的测试配置
pub fn test_config(output: &Path) -> Config {
    let mut config = Config::default();
    config.target_url = Some("https://musescore.com/user/1/scores/2".to_string());
    config.output_path = output.to_path_buf();
    config.discovery.element_timeout_ms = 50;
    config.discovery.poll_interval_ms = 1;
    config.discovery.settle_checks = 2;
    config.discovery.settle_timeout_ms = 200;
    config.assembly.load_system_fonts = false;
    config
}

/// 带 XML 声明、DOCTYPE 与注释的导出页面
pub fn exported_svg(width: u32, height: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- exported score page -->
<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">
  <rect width="{w}" height="{h}" fill="white"/>
  <path d="M10 10 L{w} {h}" stroke="black" stroke-width="2"/>
</svg>"#,
        w = width,
        h = height
    )
}

pub fn svg(width: u32, height: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="{w}" height="{h}" fill="white"/>
  <path d="M10 10 L{w} {h}" stroke="black" stroke-width="2"/>
</svg>"#,
        w = width,
        h = height
    )
}

/// 会话执行过的操作，测试结束后检查
#[derive(Debug, Default)]
pub struct ViewerState {
    pub navigated: Vec<String>,
    pub clicked: usize,
    pub pinned: Vec<usize>,
    /// 滚动时已经完成定位的子元素数量
    pub pinned_at_scroll: Option<usize>,
    pub image_polls: usize,
    pub lookups: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeNode {
    Consent,
    Container,
    Child(usize),
}

pub struct FakeViewer {
    state: Rc<RefCell<ViewerState>>,
    has_consent: bool,
    has_container: bool,
    fail_navigation: bool,
    browser_gone: bool,
    consent_appears_after: usize,
    consent_enabled_after: usize,
    child_count: usize,
    snapshots: RefCell<VecDeque<Vec<String>>>,
    endless_growth: bool,
    consent_lookups: Cell<usize>,
    enabled_checks: Cell<usize>,
}

impl FakeViewer {
    /// 每次读取图片返回下一个快照，最后一个快照会一直重复
    pub fn new(snapshots: Vec<Vec<&str>>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewerState::default())),
            has_consent: true,
            has_container: true,
            fail_navigation: false,
            browser_gone: false,
            consent_appears_after: 0,
            consent_enabled_after: 0,
            child_count: 3,
            snapshots: RefCell::new(
                snapshots
                    .into_iter()
                    .map(|s| s.into_iter().map(String::from).collect())
                    .collect(),
            ),
            endless_growth: false,
            consent_lookups: Cell::new(0),
            enabled_checks: Cell::new(0),
        }
    }

    pub fn state(&self) -> Rc<RefCell<ViewerState>> {
        Rc::clone(&self.state)
    }

    pub fn without_consent(mut self) -> Self {
        self.has_consent = false;
        self
    }

    pub fn without_container(mut self) -> Self {
        self.has_container = false;
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    /// 导航后浏览器失去连接，所有查找都返回 CDP 错误
    pub fn browser_gone(mut self) -> Self {
        self.browser_gone = true;
        self
    }

    pub fn with_children(mut self, count: usize) -> Self {
        self.child_count = count;
        self
    }

    /// 同意按钮在若干次查找后才出现，再过若干次检查才可用
    pub fn slow_consent(mut self, appears_after: usize, enabled_after: usize) -> Self {
        self.consent_appears_after = appears_after;
        self.consent_enabled_after = enabled_after;
        self
    }

    /// 每次读取都多出一张乐谱图片，永远不会稳定
    pub fn endless_growth(mut self) -> Self {
        self.endless_growth = true;
        self
    }
}

#[async_trait(?Send)]
impl ViewerSession for FakeViewer {
    type Node = FakeNode;

    async fn navigate(&mut self, url: &str) -> AppResult<()> {
        if self.fail_navigation {
            return Err(AppError::navigation(url, "dns error"));
        }
        self.state.borrow_mut().navigated.push(url.to_string());
        Ok(())
    }

    async fn find(&self, selector: &str) -> AppResult<Option<FakeNode>> {
        self.state.borrow_mut().lookups += 1;
        if self.browser_gone {
            return Err(AppError::browser("target closed"));
        }
        match selector {
            CONSENT if self.has_consent => {
                let lookups = self.consent_lookups.get();
                self.consent_lookups.set(lookups + 1);
                Ok((lookups >= self.consent_appears_after).then_some(FakeNode::Consent))
            }
            CONTAINER if self.has_container => Ok(Some(FakeNode::Container)),
            _ => Ok(None),
        }
    }

    async fn is_enabled(&self, node: &FakeNode) -> AppResult<bool> {
        assert_eq!(*node, FakeNode::Consent);
        let checks = self.enabled_checks.get();
        self.enabled_checks.set(checks + 1);
        Ok(checks >= self.consent_enabled_after)
    }

    async fn click(&self, node: &FakeNode) -> AppResult<()> {
        assert_eq!(*node, FakeNode::Consent);
        self.state.borrow_mut().clicked += 1;
        Ok(())
    }

    async fn children(&self, node: &FakeNode) -> AppResult<Vec<FakeNode>> {
        assert_eq!(*node, FakeNode::Container);
        Ok((0..self.child_count).map(FakeNode::Child).collect())
    }

    async fn pin_to_origin(&self, node: &FakeNode) -> AppResult<()> {
        // 让出执行权，未等待完成的实现会在滚动时看到未定位的元素
        tokio::task::yield_now().await;
        match node {
            FakeNode::Child(index) => self.state.borrow_mut().pinned.push(*index),
            other => panic!("unexpected node {:?}", other),
        }
        Ok(())
    }

    async fn scroll_to_end(&self, node: &FakeNode) -> AppResult<()> {
        assert_eq!(*node, FakeNode::Container);
        let mut state = self.state.borrow_mut();
        let pinned = state.pinned.len();
        state.pinned_at_scroll = Some(pinned);
        Ok(())
    }

    async fn image_sources(&self, node: &FakeNode) -> AppResult<Vec<String>> {
        assert_eq!(*node, FakeNode::Container);
        let polls = {
            let mut state = self.state.borrow_mut();
            state.image_polls += 1;
            state.image_polls
        };

        if self.endless_growth {
            return Ok((0..polls)
                .map(|i| format!("https://s3.ultimate-guitar.com/g/score_{}.svg", i))
                .collect());
        }

        let mut snapshots = self.snapshots.borrow_mut();
        if snapshots.len() > 1 {
            Ok(snapshots.pop_front().unwrap_or_default())
        } else {
            Ok(snapshots.front().cloned().unwrap_or_default())
        }
    }

    async fn close(self) -> AppResult<()> {
        self.state.borrow_mut().closed += 1;
        Ok(())
    }
}

/// 内存中的 SVG 源
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, svg: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), svg.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "connection refused"))
    }
}
