//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航、查找元素、执行 JS"的能力

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 以及在元素上调用函数的能力
/// - 不认识乐谱页面，不处理业务流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 导航到指定 URL 并等待加载完成
    pub async fn goto(&self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation(url, e))?;
        Ok(())
    }

    /// 查找第一个匹配选择器的元素，不存在时返回 `None`
    ///
    /// 用 querySelectorAll 查找，空结果即不存在，其余 CDP 错误照常返回
    pub async fn find(&self, selector: &str) -> AppResult<Option<Element>> {
        let elements = self.page.find_elements(selector).await?;
        Ok(elements.into_iter().next())
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value: JsonValue = result.into_value().map_err(AppError::browser)?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        serde_json::from_value(json_value).map_err(AppError::browser)
    }

    /// 以元素为 `this` 调用一个 JS 函数
    ///
    /// 函数抛出异常时返回错误
    pub async fn call_on(&self, element: &Element, function: &str) -> AppResult<Option<JsonValue>> {
        let returns = element.call_js_fn(function, false).await?;
        if let Some(details) = returns.exception_details {
            return Err(AppError::browser(format!("脚本异常: {}", details.text)));
        }
        Ok(returns.result.value)
    }

    /// 以元素为 `this` 调用函数，并把返回值按 JSON 反序列化
    ///
    /// 返回值在页面内先经过 `JSON.stringify`，因此数组和对象也能按值取回
    pub async fn call_on_as<T: DeserializeOwned>(&self, element: &Element, function: &str) -> AppResult<T> {
        let wrapped = format!(
            "function() {{ return JSON.stringify(({}).call(this)); }}",
            function
        );
        let value = self.call_on(element, &wrapped).await?;
        let text = value
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::browser("脚本没有返回值"))?;
        serde_json::from_str(text).map_err(AppError::browser)
    }
}
